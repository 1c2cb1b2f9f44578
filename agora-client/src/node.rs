use crate::{
    api::{CommentId, Error, NewComment, PostId, Principal},
    CommentNode, Composer, REPLY_FAILED,
};

/// Interaction state of one rendered comment. Independent from every other
/// comment's, and only about presentation: the comment itself lives in the
/// current tree snapshot.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NodeState {
    reply_open: bool,
    reply: Composer,
    collapsed: bool,
}

impl NodeState {
    pub fn is_reply_open(&self) -> bool {
        self.reply_open
    }

    pub fn reply(&self) -> &Composer {
        &self.reply
    }

    pub fn set_reply_text(&mut self, text: String) {
        self.reply.set_text(text);
    }

    /// Closing the composer throws away what was written in it
    pub fn toggle_reply(&mut self) {
        self.reply_open = !self.reply_open;
        if !self.reply_open {
            self.reply.discard();
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn toggle_collapse(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn shows_collapse_toggle(node: &CommentNode) -> bool {
        !node.children.is_empty()
    }

    pub fn visible_children<'a>(&self, node: &'a CommentNode) -> &'a [CommentNode] {
        match self.collapsed {
            true => &[],
            false => &node.children,
        }
    }

    pub fn is_idle(&self) -> bool {
        *self == NodeState::default()
    }

    pub fn begin_reply(
        &mut self,
        post: PostId,
        parent: CommentId,
        principal: Option<&Principal>,
    ) -> Result<Option<NewComment>, Error> {
        self.reply.begin(post, Some(parent), principal)
    }

    /// On success the composer closes; on failure it stays as it was
    pub fn finish_reply(&mut self, res: &Result<(), Error>) -> bool {
        let ok = self.reply.finish(res, REPLY_FAILED);
        if ok {
            self.reply_open = false;
        }
        ok
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{
        api::{Comment, UserId},
        SubmitStatus,
    };

    fn node(id: i64, children: Vec<CommentNode>) -> CommentNode {
        CommentNode {
            comment: Comment {
                id: CommentId(id),
                post_id: PostId(1),
                parent_comment_id: None,
                content: String::from("text"),
                author: String::from("bob"),
                user_id: UserId::stub(),
                created_at: Utc::now(),
            },
            children,
        }
    }

    fn bob() -> Principal {
        Principal {
            id: UserId::stub(),
            author: String::from("bob"),
        }
    }

    #[test]
    fn collapse_hides_children_only_in_view() {
        let n = node(1, vec![node(2, vec![]), node(3, vec![])]);
        let mut s = NodeState::default();
        assert!(NodeState::shows_collapse_toggle(&n));
        assert!(!NodeState::shows_collapse_toggle(&n.children[0]));
        assert_eq!(s.visible_children(&n).len(), 2);

        s.toggle_collapse();
        assert!(s.is_collapsed());
        assert!(s.visible_children(&n).is_empty());
        assert_eq!(n.children.len(), 2);

        s.toggle_collapse();
        assert_eq!(s.visible_children(&n).len(), 2);
        assert!(s.is_idle());
    }

    #[test]
    fn closing_reply_discards_text() {
        let mut s = NodeState::default();
        s.toggle_reply();
        assert!(s.is_reply_open());
        s.set_reply_text(String::from("draft"));
        s.toggle_reply();
        assert!(!s.is_reply_open());
        assert_eq!(s.reply().text(), "");
    }

    #[test]
    fn reply_targets_this_node() {
        let mut s = NodeState::default();
        s.toggle_reply();
        s.set_reply_text(String::from("me too"));
        let sent = s
            .begin_reply(PostId(1), CommentId(42), Some(&bob()))
            .unwrap()
            .unwrap();
        assert_eq!(sent.parent_comment_id, Some(CommentId(42)));
        assert_eq!(sent.author, "bob");

        assert!(s.finish_reply(&Ok(())));
        assert!(!s.is_reply_open());
        assert_eq!(s.reply().text(), "");
    }

    #[test]
    fn failed_reply_keeps_composer() {
        let mut s = NodeState::default();
        s.toggle_reply();
        s.set_reply_text(String::from("me too"));
        s.begin_reply(PostId(1), CommentId(42), Some(&bob())).unwrap();
        assert!(!s.finish_reply(&Err(Error::Transport(String::from("offline")))));
        assert!(s.is_reply_open());
        assert_eq!(s.reply().text(), "me too");
        assert_eq!(
            s.reply().status(),
            &SubmitStatus::Failed(String::from("Error posting reply"))
        );
    }

    #[test]
    fn unauthenticated_reply() {
        let mut s = NodeState::default();
        s.toggle_reply();
        s.set_reply_text(String::from("me too"));
        assert!(s
            .begin_reply(PostId(1), CommentId(42), None)
            .unwrap_err()
            .is_not_logged_in());
        assert!(s.is_reply_open());
        assert!(!s.reply().is_pending());
    }
}
