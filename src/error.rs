use thiserror::Error;

use crate::TransportError;

// Everything that can go wrong when reading or writing diary entries.
#[derive(Debug, Error)]
pub enum DiaryError {
    // No user is signed in. Raised before any request is sent.
    #[error("Login required")]
    AuthenticationRequired,

    // The operation has no backend support.
    #[error("{0} is not supported")]
    Unsupported(&'static str),

    // Writes need a numeric user id.
    #[error("User key '{0}' is not a numeric user id")]
    InvalidIdentity(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub type Result<T> = std::result::Result<T, DiaryError>;
