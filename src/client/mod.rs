//! Client-side clothing list store and its link to the wardrobe API.

pub mod backend;
pub mod error;
pub mod http;
pub mod intent;
pub mod store;

pub use backend::ClothesBackend;
pub use error::{BackendError, Operation, StoreError, StoreResult, ValidationError};
pub use http::{ClientConfig, HttpBackend};
pub use intent::{ClothingDraft, Intent};
pub use store::ClothingListStore;
