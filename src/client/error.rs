//! Error types for the clothing list store.

use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::domain::types::ClothingId;

/// Failures reported by a [`crate::client::ClothesBackend`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The request could not be sent or no response was received.
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("Request failed ({status}): {message}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Response body returned by the backend.
        message: String,
    },

    /// The configured base URL cannot address the API.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// The backend answered 2xx with a body that could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Local precondition failures detected before any request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("label cannot be empty")]
    EmptyLabel,

    #[error("clothing type is required")]
    MissingClothingType,

    #[error("season is required")]
    MissingSeason,

    #[error("invalid image url")]
    InvalidImageUrl,

    #[error("no clothing item with id `{0}`")]
    UnknownId(ClothingId),
}

/// Store operation that was attempted when a failure occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Load,
    Add,
    Update(ClothingId),
    Remove(ClothingId),
    IncrementWear(ClothingId),
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Load => write!(f, "load"),
            Operation::Add => write!(f, "add"),
            Operation::Update(id) => write!(f, "update `{id}`"),
            Operation::Remove(id) => write!(f, "remove `{id}`"),
            Operation::IncrementWear(id) => write!(f, "increment wear of `{id}`"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Operation {operation} failed: {source}")]
    OperationFailed {
        operation: Operation,
        #[source]
        source: BackendError,
    },
}

impl StoreError {
    /// The operation that failed at the backend, if any request was sent.
    pub fn operation(&self) -> Option<&Operation> {
        match self {
            StoreError::OperationFailed { operation, .. } => Some(operation),
            StoreError::Validation(_) => None,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
