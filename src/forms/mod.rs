//! Request payloads accepted by the wardrobe API.

use thiserror::Error;
use validator::ValidationErrors;

pub mod clothing;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid label")]
    InvalidLabel,

    #[error("invalid url")]
    InvalidUrl,
}
