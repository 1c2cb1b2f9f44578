use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::{
    api::{Comment, CommentId, Error, NewComment, PostId, Principal},
    build_tree, forest_len, CommentNode, CommentStore, Composer, NodeState, COMMENT_FAILED,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SectionView {
    /// Nothing fetched yet
    Loading,

    /// The last fetch failed, with this message
    Failed(String),

    Loaded(Arc<Vec<CommentNode>>),
}

/// The comments of one post, along with everything needed to interact with them.
///
/// Every confirmed write is followed by a full reload: the tree is always
/// rebuilt from what the store returns, and never patched locally.
#[derive(Clone, Debug)]
pub struct CommentSection {
    post_id: PostId,
    view: SectionView,
    refreshing: bool,
    composer: Composer,
    nodes: HashMap<CommentId, NodeState>,
}

impl CommentSection {
    pub fn new(post_id: PostId) -> CommentSection {
        CommentSection {
            post_id,
            view: SectionView::Loading,
            refreshing: false,
            composer: Composer::default(),
            nodes: HashMap::new(),
        }
    }

    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    pub fn view(&self) -> &SectionView {
        &self.view
    }

    /// Whether a fetch is in flight
    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn forest(&self) -> Option<&Arc<Vec<CommentNode>>> {
        match &self.view {
            SectionView::Loaded(forest) => Some(forest),
            _ => None,
        }
    }

    pub fn comment_count(&self) -> usize {
        self.forest().map(|f| forest_len(f)).unwrap_or(0)
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut Composer {
        &mut self.composer
    }

    pub fn node(&self, id: CommentId) -> Option<&NodeState> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: CommentId) -> &mut NodeState {
        self.nodes.entry(id).or_default()
    }

    /// Keeps showing the current tree while refetching, if there is one
    pub fn start_loading(&mut self) {
        self.refreshing = true;
        if !matches!(self.view, SectionView::Loaded(_)) {
            self.view = SectionView::Loading;
        }
    }

    pub fn received(&mut self, res: Result<Vec<Comment>, Error>) {
        self.refreshing = false;
        match res {
            Ok(flat) => {
                tracing::debug!(post = ?self.post_id, num_comments = flat.len(), "received comments");
                let present = flat.iter().map(|c| c.id).collect::<HashSet<_>>();
                self.nodes
                    .retain(|id, s| present.contains(id) || s.reply().is_pending());
                self.view = SectionView::Loaded(Arc::new(build_tree(&flat)));
            }
            Err(e) => {
                tracing::error!(post = ?self.post_id, ?e, "failed fetching comments");
                self.view = SectionView::Failed(e.to_string());
            }
        }
    }

    pub async fn load<S: CommentStore + ?Sized>(&mut self, store: &S) {
        self.start_loading();
        let res = store.fetch_comments(self.post_id).await;
        self.received(res);
    }

    pub fn begin_top_level(
        &mut self,
        principal: Option<&Principal>,
    ) -> Result<Option<NewComment>, Error> {
        self.composer.begin(self.post_id, None, principal)
    }

    /// Returns whether the comments should be reloaded
    pub fn finish_top_level(&mut self, res: &Result<(), Error>) -> bool {
        self.composer.finish(res, COMMENT_FAILED)
    }

    pub fn begin_reply(
        &mut self,
        parent: CommentId,
        principal: Option<&Principal>,
    ) -> Result<Option<NewComment>, Error> {
        let post = self.post_id;
        self.node_mut(parent).begin_reply(post, parent, principal)
    }

    /// Returns whether the comments should be reloaded
    pub fn finish_reply(&mut self, parent: CommentId, res: &Result<(), Error>) -> bool {
        self.node_mut(parent).finish_reply(res)
    }

    /// Posts the top-level composer's text, then reloads.
    ///
    /// Returns `Ok(false)` if there was nothing to post.
    pub async fn submit_top_level<S: CommentStore + ?Sized>(
        &mut self,
        store: &S,
        principal: Option<&Principal>,
    ) -> Result<bool, Error> {
        let comment = match self.begin_top_level(principal)? {
            Some(c) => c,
            None => return Ok(false),
        };
        tracing::debug!(post = ?self.post_id, "submitting comment");
        let res = store.insert_comment(comment).await;
        if self.finish_top_level(&res) {
            self.load(store).await;
        }
        res.map(|()| true)
    }

    /// Posts the reply written under `parent`, then reloads.
    ///
    /// Returns `Ok(false)` if there was nothing to post.
    pub async fn submit_reply<S: CommentStore + ?Sized>(
        &mut self,
        store: &S,
        parent: CommentId,
        principal: Option<&Principal>,
    ) -> Result<bool, Error> {
        let comment = match self.begin_reply(parent, principal)? {
            Some(c) => c,
            None => return Ok(false),
        };
        tracing::debug!(post = ?self.post_id, ?parent, "submitting reply");
        let res = store.insert_comment(comment).await;
        if self.finish_reply(parent, &res) {
            self.load(store).await;
        }
        res.map(|()| true)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::{api::UserId, SubmitStatus};

    fn comment(id: i64, parent: Option<i64>) -> Comment {
        Comment {
            id: CommentId(id),
            post_id: PostId(1),
            parent_comment_id: parent.map(CommentId),
            content: String::from("text"),
            author: String::from("carol"),
            user_id: UserId::stub(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn loading_states() {
        let mut s = CommentSection::new(PostId(1));
        assert_eq!(s.view(), &SectionView::Loading);

        s.start_loading();
        s.received(Ok(vec![comment(2, Some(1)), comment(1, None)]));
        assert!(!s.is_refreshing());
        assert_eq!(s.comment_count(), 2);
        let first = s.forest().cloned().unwrap();

        // refetching keeps the previous snapshot around
        s.start_loading();
        assert!(s.is_refreshing());
        assert_eq!(s.forest(), Some(&first));

        s.received(Err(Error::Store {
            message: String::from("JWT expired"),
            code: Some(String::from("PGRST301")),
        }));
        assert_eq!(s.view(), &SectionView::Failed(String::from("JWT expired")));
        assert_eq!(s.comment_count(), 0);

        s.start_loading();
        assert_eq!(s.view(), &SectionView::Loading);
    }

    #[test]
    fn node_state_survives_rebuilds() {
        let mut s = CommentSection::new(PostId(1));
        s.received(Ok(vec![comment(2, Some(1)), comment(1, None)]));
        s.node_mut(CommentId(1)).toggle_collapse();
        s.node_mut(CommentId(2)).toggle_reply();

        // comment 2 got deleted in the meantime
        s.received(Ok(vec![comment(3, Some(1)), comment(1, None)]));
        assert!(s.node(CommentId(1)).unwrap().is_collapsed());
        assert!(s.node(CommentId(2)).is_none());
        assert_eq!(
            s.forest().unwrap()[0].children[0].id(),
            CommentId(3)
        );
    }

    #[test]
    fn concurrent_replies_are_tracked_per_node() {
        let me = Principal {
            id: UserId::stub(),
            author: String::from("carol"),
        };
        let (a, b) = (CommentId(1), CommentId(2));
        let mut s = CommentSection::new(PostId(1));
        s.received(Ok(vec![comment(2, None), comment(1, None)]));
        for (id, text) in [(a, "first"), (b, "second")] {
            s.node_mut(id).toggle_reply();
            s.node_mut(id).set_reply_text(String::from(text));
        }

        assert!(s.begin_reply(a, Some(&me)).unwrap().is_some());
        assert!(s.begin_reply(b, Some(&me)).unwrap().is_some());
        assert!(s.node(a).unwrap().reply().is_pending());
        assert!(s.node(b).unwrap().reply().is_pending());

        // a's reply lands and triggers a reload, in which b's comment is gone
        assert!(s.finish_reply(a, &Ok(())));
        s.start_loading();
        s.received(Ok(vec![comment(3, Some(1)), comment(1, None)]));
        assert_eq!(s.node(a).unwrap().reply().status(), &SubmitStatus::Idle);
        assert!(!s.node(a).unwrap().is_reply_open());
        assert!(s.node(b).unwrap().reply().is_pending());
        assert_eq!(s.node(b).unwrap().reply().text(), "second");

        assert!(!s.finish_reply(b, &Err(Error::Transport(String::from("x")))));
        assert_eq!(s.node(a).unwrap().reply().status(), &SubmitStatus::Idle);
        assert_eq!(
            s.node(b).unwrap().reply().status(),
            &SubmitStatus::Failed(String::from("Error posting reply"))
        );
        assert_eq!(s.node(b).unwrap().reply().text(), "second");
    }
}
