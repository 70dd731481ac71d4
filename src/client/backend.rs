//! The seam between the store and the wardrobe API.

use crate::client::error::BackendError;
use crate::domain::clothing::{Clothing, NewClothing, UpdateClothing};
use crate::domain::types::ClothingId;

/// Remote collaborator holding the authoritative wardrobe.
///
/// Each method corresponds to exactly one request. Implementations must not
/// retry.
#[allow(async_fn_in_trait)]
pub trait ClothesBackend {
    async fn list_clothes(&self) -> Result<Vec<Clothing>, BackendError>;
    async fn create_clothing(&self, new_clothing: &NewClothing) -> Result<Clothing, BackendError>;
    async fn update_clothing(
        &self,
        id: &ClothingId,
        updates: &UpdateClothing,
    ) -> Result<Clothing, BackendError>;
    async fn delete_clothing(&self, id: &ClothingId) -> Result<(), BackendError>;
}

impl<B: ClothesBackend + ?Sized> ClothesBackend for &B {
    async fn list_clothes(&self) -> Result<Vec<Clothing>, BackendError> {
        (**self).list_clothes().await
    }

    async fn create_clothing(&self, new_clothing: &NewClothing) -> Result<Clothing, BackendError> {
        (**self).create_clothing(new_clothing).await
    }

    async fn update_clothing(
        &self,
        id: &ClothingId,
        updates: &UpdateClothing,
    ) -> Result<Clothing, BackendError> {
        (**self).update_clothing(id, updates).await
    }

    async fn delete_clothing(&self, id: &ClothingId) -> Result<(), BackendError> {
        (**self).delete_clothing(id).await
    }
}
