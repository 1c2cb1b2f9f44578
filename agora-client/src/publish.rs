use crate::{
    api::{Error, NewCommunity, NewPost},
    CommunityStore, PostStore,
};

/// Validates `post` before handing it to the store
pub async fn create_post<S: PostStore + ?Sized>(store: &S, post: NewPost) -> Result<(), Error> {
    post.validate()?;
    tracing::debug!(title = %post.title, "creating post");
    store.insert_post(post).await
}

/// Validates `community` before handing it to the store
pub async fn create_community<S: CommunityStore + ?Sized>(
    store: &S,
    community: NewCommunity,
) -> Result<(), Error> {
    community.validate()?;
    tracing::debug!(title = %community.title, "creating community");
    store.insert_community(community).await
}
