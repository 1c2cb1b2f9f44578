use crate::{PostId, Time, UserId};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct VoteId(pub i64);

/// Stored as 1 or -1 by the backend
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum VoteValue {
    Up,
    Down,
}

impl From<VoteValue> for i64 {
    fn from(v: VoteValue) -> i64 {
        match v {
            VoteValue::Up => 1,
            VoteValue::Down => -1,
        }
    }
}

impl TryFrom<i64> for VoteValue {
    type Error = String;

    fn try_from(v: i64) -> Result<VoteValue, String> {
        match v {
            1 => Ok(VoteValue::Up),
            -1 => Ok(VoteValue::Down),
            v => Err(format!("invalid vote value {v}")),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Vote {
    pub id: VoteId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub vote: VoteValue,
    pub created_at: Time,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewVote {
    pub post_id: PostId,
    pub user_id: UserId,
    pub vote: VoteValue,
}
