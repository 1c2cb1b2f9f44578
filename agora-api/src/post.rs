use crate::{CommunityId, Error, Time};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct PostId(pub i64);

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub created_at: Time,

    #[serde(default)]
    pub image_url: Option<String>,

    /// Avatar of the author at the time of posting
    #[serde(default)]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub community_id: Option<CommunityId>,
}

pub const POST_TITLE_MIN_LEN: usize = 5;
pub const POST_CONTENT_MIN_LEN: usize = 3;

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub community_id: Option<CommunityId>,
    pub image_url: Option<String>,
    pub avatar_url: Option<String>,
}

impl NewPost {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_min_len("title", &self.title, POST_TITLE_MIN_LEN)?;
        crate::validate_min_len("content", &self.content, POST_CONTENT_MIN_LEN)?;
        if let Some(url) = &self.image_url {
            crate::validate_string(url)?;
        }
        if let Some(url) = &self.avatar_url {
            crate::validate_string(url)?;
        }
        Ok(())
    }
}
