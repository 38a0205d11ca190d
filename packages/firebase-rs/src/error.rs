use thiserror::Error;

#[derive(Debug, Error)]
pub enum FirebaseError {
    #[error("Invalid service account credentials: {0}")]
    Credentials(String),

    #[error("Failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// Google answered with an error document; `message` is passed through as-is
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse Firebase response: {0}")]
    Decode(String),

    #[error("{0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, FirebaseError>;
