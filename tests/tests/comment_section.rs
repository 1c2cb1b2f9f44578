use agora_client::{
    api::Error,
    find_in, CommentSection, SectionView, SubmitStatus,
};

#[macro_use]
mod common;
use common::Fixture;

async fn reply(text: String, logged_in: bool) {
    let f = Fixture::new();
    let root = f.server.test_add_comment(f.post, None, "root", &f.alice);
    let mut section = f.loaded_section().await;
    section.node_mut(root).toggle_reply();
    section.node_mut(root).set_reply_text(text.clone());

    let principal = logged_in.then_some(&f.bob);
    let res = section.submit_reply(&f.server, root, principal).await;
    let node = section.node(root).expect("node state disappeared");

    if text.trim().is_empty() {
        assert_eq!(res, Ok(false));
        assert_eq!(f.server.test_num_comment_inserts(), 0);
        assert!(node.is_reply_open());
    } else if !logged_in {
        assert!(matches!(res, Err(ref e) if e.is_not_logged_in()));
        assert_eq!(f.server.test_num_comment_inserts(), 0);
        assert_eq!(node.reply().text(), text);
        assert_eq!(node.reply().status(), &SubmitStatus::Idle);
    } else if text.contains('\0') {
        assert!(matches!(res, Err(Error::NullByteInString(_))));
        assert_eq!(f.server.test_num_comment_inserts(), 0);
        assert_eq!(node.reply().text(), text);
    } else {
        assert_eq!(res, Ok(true));
        assert_eq!(f.server.test_num_comment_inserts(), 1);
        assert_eq!(f.server.test_num_writes(), 1);
        assert!(!node.is_reply_open());
        assert_eq!(node.reply().text(), "");

        let forest = section.forest().expect("section not reloaded");
        let root_node = find_in(forest, root).expect("root comment vanished");
        assert_eq!(root_node.children.len(), 1);
        let r = &root_node.children[0].comment;
        assert_eq!(r.content, text);
        assert_eq!(r.parent_comment_id, Some(root));
        assert_eq!(r.author, "bob");
        assert_eq!(r.user_id, f.bob.id);
    }
}

do_mock_test!(reply_is_posted_once, (String, bool), |(t, l)| reply(t, l));

async fn top_level(text: String) {
    let f = Fixture::new();
    let mut section = f.loaded_section().await;
    section.composer_mut().set_text(text.clone());
    let res = section.submit_top_level(&f.server, Some(&f.alice)).await;
    if text.trim().is_empty() {
        assert_eq!(res, Ok(false));
        assert_eq!(f.server.test_num_comment_inserts(), 0);
        assert_eq!(section.comment_count(), 0);
    } else if text.contains('\0') {
        assert!(res.is_err());
        assert_eq!(f.server.test_num_comment_inserts(), 0);
        assert_eq!(section.composer().text(), text);
    } else {
        assert_eq!(res, Ok(true));
        assert_eq!(f.server.test_num_comment_inserts(), 1);
        assert_eq!(section.composer().text(), "");
        let forest = section.forest().expect("section not reloaded");
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].comment.parent_comment_id, None);
        assert_eq!(forest[0].comment.content, text);
    }
}

do_mock_test!(top_level_comment, String, top_level);

#[tokio::test]
async fn write_failure_keeps_text() {
    let f = Fixture::new();
    let root = f.server.test_add_comment(f.post, None, "root", &f.alice);
    let mut section = f.loaded_section().await;
    section.node_mut(root).toggle_reply();
    section
        .node_mut(root)
        .set_reply_text(String::from("I disagree"));
    f.server.fail_next_write(Error::Store {
        message: String::from("JWT expired"),
        code: Some(String::from("PGRST301")),
    });

    let res = section.submit_reply(&f.server, root, Some(&f.bob)).await;
    assert!(matches!(res, Err(Error::Store { .. })));
    let node = section.node(root).unwrap();
    assert!(node.is_reply_open());
    assert_eq!(node.reply().text(), "I disagree");
    assert_eq!(node.reply().error(), Some("Error posting reply"));
    assert_eq!(section.comment_count(), 1);

    // retrying works and clears the error
    let res = section.submit_reply(&f.server, root, Some(&f.bob)).await;
    assert_eq!(res, Ok(true));
    assert_eq!(section.node(root).unwrap().reply().error(), None);
    assert_eq!(section.comment_count(), 2);
}

#[tokio::test]
async fn fetch_failure_is_shown_verbatim() {
    let f = Fixture::new();
    f.server.fail_next_fetch(Error::Transport(String::from("connection reset")));
    let mut section = CommentSection::new(f.post);
    section.load(&f.server).await;
    assert_eq!(
        section.view(),
        &SectionView::Failed(String::from("Network error: connection reset"))
    );

    section.load(&f.server).await;
    assert!(matches!(section.view(), SectionView::Loaded(_)));
}

#[tokio::test]
async fn reply_to_reply_nests_and_survives_reload() {
    let f = Fixture::new();
    let root = f.server.test_add_comment(f.post, None, "root", &f.alice);
    let child = f.server.test_add_comment(f.post, Some(root), "child", &f.bob);
    f.server.test_add_comment(f.post, None, "other root", &f.bob);

    let mut section = f.loaded_section().await;
    section.node_mut(root).toggle_collapse();
    section.node_mut(child).toggle_reply();
    section
        .node_mut(child)
        .set_reply_text(String::from("grandchild"));
    assert_eq!(
        section.submit_reply(&f.server, child, Some(&f.alice)).await,
        Ok(true)
    );

    let forest = section.forest().unwrap();
    assert_eq!(forest.len(), 2);
    let child_node = find_in(forest, child).unwrap();
    assert_eq!(child_node.children.len(), 1);
    assert_eq!(child_node.children[0].comment.content, "grandchild");
    assert_eq!(find_in(forest, root).unwrap().depth(), 3);

    // presentation state of other comments is untouched
    assert!(section.node(root).unwrap().is_collapsed());
    assert!(!section.node(child).unwrap().is_collapsed());
}

#[tokio::test]
async fn comments_of_other_posts_are_ignored() {
    let f = Fixture::new();
    let other = f.server.test_add_post("Another post", None);
    f.server.test_add_comment(other, None, "elsewhere", &f.alice);
    f.server.test_add_comment(f.post, None, "here", &f.alice);
    let section = f.loaded_section().await;
    assert_eq!(section.comment_count(), 1);
    assert_eq!(section.forest().unwrap()[0].comment.content, "here");
}
