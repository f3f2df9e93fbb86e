//! Failure taxonomy for login and authenticated API calls.
//!
//! Navigation decisions never appear here: "access denied" is a redirect,
//! not an error.

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("login rejected by server (status {status})")]
    Rejected { status: u16 },
    #[error("a login attempt is already in progress")]
    LoginInFlight,
    #[error("login request failed: {0}")]
    Network(String),
    #[error("malformed login response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("request body could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("session expired; sign in again")]
    SessionExpired,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("response could not be decoded: {0}")]
    Decode(String),
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Decode(msg) => Self::MalformedResponse(msg),
            ApiError::Status(status) => Self::Rejected { status },
            other => Self::Network(other.to_string()),
        }
    }
}
