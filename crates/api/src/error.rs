use thiserror::Error;

/// Errors surfaced to the person talking to the bot. The `Display` output
/// is sent back as the reply, so every message is written for an end user.
#[derive(Error, Debug, PartialEq)]
pub enum NagError {
    #[error("{0}")]
    InternalError(String),
    #[error("{0}")]
    BadClientData(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
}
