mod composer;
pub use composer::{Composer, SubmitStatus, COMMENT_FAILED, REPLY_FAILED};

mod node;
pub use node::NodeState;

mod publish;
pub use publish::{create_community, create_post};

pub mod rest;
pub use rest::RestBackend;

mod section;
pub use section::{CommentSection, SectionView};

pub mod store;
pub use store::{CommentStore, CommunityStore, PostStore, VoteStore};

mod tree;
pub use tree::{build_tree, find_in, forest_len, CommentNode};

mod vote;
pub use vote::{cast_vote, plan_vote, VoteChange, VoteTally};

pub mod api {
    pub use agora_api::*;
}
