use crate::{Error, PostId, Principal, Time, UserId};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CommentId(pub i64);

/// A comment as stored by the backend: replies only reference their parent
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,

    /// None for a top-level comment
    #[serde(default)]
    pub parent_comment_id: Option<CommentId>,

    pub content: String,
    pub author: String,
    pub user_id: UserId,
    pub created_at: Time,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewComment {
    pub post_id: PostId,
    pub content: String,
    pub parent_comment_id: Option<CommentId>,
    pub user_id: UserId,
    pub author: String,
}

impl NewComment {
    pub fn new(
        post_id: PostId,
        content: String,
        parent_comment_id: Option<CommentId>,
        principal: &Principal,
    ) -> NewComment {
        NewComment {
            post_id,
            content,
            parent_comment_id,
            user_id: principal.id,
            author: principal.author.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_min_len("content", &self.content, 1)?;
        crate::validate_string(&self.author)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_row() {
        let c: Comment = serde_json::from_str(
            r#"{
                "id": 12,
                "created_at": "2024-05-01T10:20:30.123456+00:00",
                "post_id": 3,
                "content": "first!",
                "user_id": "ffffffff-ffff-ffff-ffff-ffffffffffff",
                "author": "alice",
                "parent_comment_id": null
            }"#,
        )
        .unwrap();
        assert_eq!(c.id, CommentId(12));
        assert_eq!(c.post_id, PostId(3));
        assert_eq!(c.parent_comment_id, None);
        assert_eq!(c.user_id, UserId::stub());
    }

    #[test]
    fn new_comment_carries_principal() {
        let p = Principal {
            id: UserId::stub(),
            author: String::from("bob"),
        };
        let c = NewComment::new(PostId(1), String::from("hi"), Some(CommentId(4)), &p);
        assert_eq!(c.author, "bob");
        assert_eq!(c.user_id, UserId::stub());
        assert_eq!(c.parent_comment_id, Some(CommentId(4)));
        assert_eq!(c.validate(), Ok(()));

        let json = serde_json::to_value(&NewComment::new(PostId(1), String::from("hi"), None, &p))
            .unwrap();
        assert_eq!(json["parent_comment_id"], serde_json::Value::Null);
    }

    #[test]
    fn empty_comment_is_invalid() {
        let p = Principal {
            id: UserId::stub(),
            author: String::from("bob"),
        };
        assert!(NewComment::new(PostId(1), String::from(" \n"), None, &p)
            .validate()
            .is_err());
    }
}
