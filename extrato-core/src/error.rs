//! Error type shared by the core crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtratoError {
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, ExtratoError>;
