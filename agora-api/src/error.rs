use anyhow::anyhow;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("{0}")]
    NotLoggedIn(&'static str),

    /// The backend refused the request, message is shown to the user as-is
    #[error("{message}")]
    Store {
        message: String,
        code: Option<String>,
    },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Not found")]
    NotFound,

    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),
}

// Code PostgREST answers with when a single row was requested but none matched
const NO_ROWS_CODE: &str = "PGRST116";

impl Error {
    pub fn not_logged_in_to_comment() -> Error {
        Error::NotLoggedIn("You must be logged in to comment")
    }

    pub fn not_logged_in_to_vote() -> Error {
        Error::NotLoggedIn("You must be logged in to vote")
    }

    pub fn is_not_logged_in(&self) -> bool {
        matches!(self, Error::NotLoggedIn(_))
    }

    /// Parses an error body as returned by the REST or the auth endpoints
    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value = serde_json::from_slice(body)?;
        let message = ["message", "msg", "error_description"]
            .iter()
            .find_map(|k| data.get(*k).and_then(|m| m.as_str()))
            .ok_or_else(|| anyhow!("error body has no message"))?;
        let code = ["code", "error_code", "error"]
            .iter()
            .find_map(|k| match data.get(*k)? {
                serde_json::Value::String(s) => Some(s.clone()),
                serde_json::Value::Number(n) => Some(n.to_string()),
                _ => None,
            });
        if code.as_deref() == Some(NO_ROWS_CODE) {
            return Ok(Error::NotFound);
        }
        Ok(Error::Store {
            message: String::from(message),
            code,
        })
    }

    /// Like `parse`, but never fails: undecodable bodies are reported with their HTTP status
    pub fn from_response(status: u16, body: &[u8]) -> Error {
        match Error::parse(body) {
            Ok(e) => e,
            Err(_) => Error::Unknown(format!(
                "request failed with status {status}: {}",
                String::from_utf8_lossy(body)
            )),
        }
    }
}
