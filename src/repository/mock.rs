//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::clothing::{Clothing, NewClothing, UpdateClothing};
use crate::domain::types::ClothingId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClothingListQuery, ClothingReader, ClothingWriter};

mock! {
    pub Repository {}

    impl ClothingReader for Repository {
        fn get_clothing_by_id(&self, id: &ClothingId) -> RepositoryResult<Option<Clothing>>;
        fn list_clothes(&self, query: ClothingListQuery) -> RepositoryResult<Vec<Clothing>>;
    }

    impl ClothingWriter for Repository {
        fn create_clothing(&self, new_clothing: &NewClothing) -> RepositoryResult<Clothing>;
        fn update_clothing(
            &self,
            id: &ClothingId,
            updates: &UpdateClothing,
        ) -> RepositoryResult<Clothing>;
        fn delete_clothing(&self, id: &ClothingId) -> RepositoryResult<()>;
    }
}
