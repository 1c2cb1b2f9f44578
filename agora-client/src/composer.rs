use crate::api::{CommentId, Error, NewComment, PostId, Principal};

pub const COMMENT_FAILED: &str = "Error posting comment";
pub const REPLY_FAILED: &str = "Error posting reply";

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Pending,

    /// The last submission failed, with this notice for the user
    Failed(String),
}

/// Text box used to write a comment, either top-level or a reply
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Composer {
    text: String,
    status: SubmitStatus,
}

impl Composer {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == SubmitStatus::Pending
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            SubmitStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty() && !self.is_pending()
    }

    /// Drops the text, unless a submission is in flight
    pub fn discard(&mut self) {
        if !self.is_pending() {
            self.text.clear();
            self.status = SubmitStatus::Idle;
        }
    }

    /// Returns the comment to send to the store, or `None` if there is nothing to send.
    ///
    /// Fails without touching the composer if nobody is logged in.
    pub fn begin(
        &mut self,
        post: PostId,
        parent: Option<CommentId>,
        principal: Option<&Principal>,
    ) -> Result<Option<NewComment>, Error> {
        if !self.can_submit() {
            return Ok(None);
        }
        let principal = principal.ok_or_else(Error::not_logged_in_to_comment)?;
        let comment = NewComment::new(post, self.text.clone(), parent, principal);
        comment.validate()?;
        self.status = SubmitStatus::Pending;
        Ok(Some(comment))
    }

    /// Records the outcome of the submission started by `begin`, returning
    /// whether it succeeded. The text is only kept on failure, in which case
    /// `notice` is shown and the store's error only logged.
    pub fn finish(&mut self, res: &Result<(), Error>, notice: &str) -> bool {
        match res {
            Ok(()) => {
                self.text.clear();
                self.status = SubmitStatus::Idle;
                true
            }
            Err(e) => {
                tracing::error!(?e, "failed submitting comment");
                self.status = SubmitStatus::Failed(String::from(notice));
                false
            }
        }
    }
}
