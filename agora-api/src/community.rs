use crate::{Error, Time};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CommunityId(pub i64);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Community {
    pub id: CommunityId,
    pub title: String,
    pub description: String,
    pub created_at: Time,
}

pub const COMMUNITY_NAME_MIN_LEN: usize = 4;
pub const COMMUNITY_DESCRIPTION_MIN_LEN: usize = 7;

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewCommunity {
    pub title: String,
    pub description: String,
}

impl NewCommunity {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_min_len("name", &self.title, COMMUNITY_NAME_MIN_LEN)?;
        crate::validate_min_len(
            "description",
            &self.description,
            COMMUNITY_DESCRIPTION_MIN_LEN,
        )?;
        Ok(())
    }
}
