use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        clothing::{Clothing, NewClothing, UpdateClothing},
        types::{ClothingId, ClothingType, Season},
    },
    repository::errors::RepositoryResult,
};

pub mod clothing;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// Optional narrowing of the clothes listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClothingListQuery {
    pub season: Option<Season>,
    pub clothing_type: Option<ClothingType>,
}

impl ClothingListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    pub fn clothing_type(mut self, clothing_type: ClothingType) -> Self {
        self.clothing_type = Some(clothing_type);
        self
    }
}

pub trait ClothingReader {
    fn get_clothing_by_id(&self, id: &ClothingId) -> RepositoryResult<Option<Clothing>>;
    fn list_clothes(&self, query: ClothingListQuery) -> RepositoryResult<Vec<Clothing>>;
}

pub trait ClothingWriter {
    fn create_clothing(&self, new_clothing: &NewClothing) -> RepositoryResult<Clothing>;
    fn update_clothing(
        &self,
        id: &ClothingId,
        updates: &UpdateClothing,
    ) -> RepositoryResult<Clothing>;
    fn delete_clothing(&self, id: &ClothingId) -> RepositoryResult<()>;
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}
