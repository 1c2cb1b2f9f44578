//! What the client needs from the hosted backend.
//!
//! Futures are not `Send`: the web client runs everything on the browser's
//! single thread.

use async_trait::async_trait;

use crate::api::{
    Comment, Community, CommunityId, Error, NewComment, NewCommunity, NewPost, NewVote, Post,
    PostId, Vote, VoteId, VoteValue,
};

#[async_trait(?Send)]
pub trait CommentStore {
    /// All the comments of `post`, most recent first
    async fn fetch_comments(&self, post: PostId) -> Result<Vec<Comment>, Error>;

    async fn insert_comment(&self, comment: NewComment) -> Result<(), Error>;
}

#[async_trait(?Send)]
pub trait PostStore {
    /// Most recent first
    async fn fetch_posts(&self) -> Result<Vec<Post>, Error>;

    async fn fetch_post(&self, post: PostId) -> Result<Post, Error>;

    /// Most recent first
    async fn fetch_community_posts(&self, community: CommunityId) -> Result<Vec<Post>, Error>;

    async fn insert_post(&self, post: NewPost) -> Result<(), Error>;
}

#[async_trait(?Send)]
pub trait CommunityStore {
    /// Most recent first
    async fn fetch_communities(&self) -> Result<Vec<Community>, Error>;

    async fn insert_community(&self, community: NewCommunity) -> Result<(), Error>;
}

#[async_trait(?Send)]
pub trait VoteStore {
    async fn fetch_votes(&self, post: PostId) -> Result<Vec<Vote>, Error>;
    async fn insert_vote(&self, vote: NewVote) -> Result<(), Error>;
    async fn update_vote(&self, vote: VoteId, value: VoteValue) -> Result<(), Error>;
    async fn delete_vote(&self, vote: VoteId) -> Result<(), Error>;
}
