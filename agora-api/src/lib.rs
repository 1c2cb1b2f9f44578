use chrono::Utc;

pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<Utc>;

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

mod comment;
pub use comment::{Comment, CommentId, NewComment};

mod community;
pub use community::{Community, CommunityId, NewCommunity};

mod error;
pub use error::Error;

mod post;
pub use post::{NewPost, Post, PostId};

mod user;
pub use user::{Principal, Session, UserId};

mod vote;
pub use vote::{NewVote, Vote, VoteId, VoteValue};

pub fn validate_string(s: &str) -> Result<(), Error> {
    if s.contains('\0') {
        Err(Error::NullByteInString(String::from(s)))
    } else {
        Ok(())
    }
}

/// Checks `s` has at least `min` characters once surrounding whitespace is trimmed
pub fn validate_min_len(field: &'static str, s: &str, min: usize) -> Result<(), Error> {
    validate_string(s)?;
    let len = s.trim().chars().count();
    if len == 0 {
        return Err(Error::InvalidField {
            field,
            reason: String::from("is required"),
        });
    }
    if len < min {
        return Err(Error::InvalidField {
            field,
            reason: format!("must be at least {min} characters"),
        });
    }
    Ok(())
}
