//! Repository implementation for clothing items.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        clothing::{Clothing, NewClothing, UpdateClothing},
        types::ClothingId,
    },
    models::clothing::{
        Clothing as DbClothing, NewClothing as DbNewClothing,
        UpdateClothing as DbUpdateClothing,
    },
    repository::{
        ClothingListQuery, ClothingReader, ClothingWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl ClothingReader for DieselRepository {
    fn get_clothing_by_id(&self, id: &ClothingId) -> RepositoryResult<Option<Clothing>> {
        use crate::schema::clothes;

        let mut conn = self.conn()?;
        let db_clothing = clothes::table
            .filter(clothes::public_id.eq(id.as_str()))
            .first::<DbClothing>(&mut conn)
            .optional()?;

        match db_clothing {
            Some(db_clothing) => Ok(Some(
                Clothing::try_from(db_clothing).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_clothes(&self, query: ClothingListQuery) -> RepositoryResult<Vec<Clothing>> {
        use crate::schema::clothes;

        let mut conn = self.conn()?;

        let mut items = clothes::table.into_boxed();
        if let Some(season) = query.season {
            items = items.filter(clothes::season.eq(season.as_str()));
        }
        if let Some(clothing_type) = query.clothing_type {
            items = items.filter(clothes::clothing_type.eq(clothing_type.as_str()));
        }

        items
            .order(clothes::id.asc())
            .load::<DbClothing>(&mut conn)?
            .into_iter()
            .map(|db_clothing| Clothing::try_from(db_clothing).map_err(RepositoryError::from))
            .collect()
    }
}

impl ClothingWriter for DieselRepository {
    fn create_clothing(&self, new_clothing: &NewClothing) -> RepositoryResult<Clothing> {
        use crate::schema::clothes;

        let mut conn = self.conn()?;

        let public_id = ClothingId::generate();
        let db_new_clothing = DbNewClothing::from_domain(&public_id, new_clothing);

        let db_clothing = diesel::insert_into(clothes::table)
            .values(&db_new_clothing)
            .get_result::<DbClothing>(&mut conn)?;

        Clothing::try_from(db_clothing).map_err(RepositoryError::from)
    }

    fn update_clothing(
        &self,
        id: &ClothingId,
        updates: &UpdateClothing,
    ) -> RepositoryResult<Clothing> {
        use crate::schema::clothes;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateClothing::from_domain(updates, Utc::now().naive_utc());

        let db_clothing = diesel::update(clothes::table.filter(clothes::public_id.eq(id.as_str())))
            .set(&db_updates)
            .get_result::<DbClothing>(&mut conn)?;

        Clothing::try_from(db_clothing).map_err(RepositoryError::from)
    }

    fn delete_clothing(&self, id: &ClothingId) -> RepositoryResult<()> {
        use crate::schema::clothes;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(clothes::table.filter(clothes::public_id.eq(id.as_str())))
            .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
