use thiserror::Error;

pub type Result<T> = std::result::Result<T, SendGridError>;

#[derive(Debug, Error)]
pub enum SendGridError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("SendGrid API error ({status}): {message}")]
    Api { status: u16, message: String },
}
