//! Services coordinating wardrobe workflows.

use crate::domain::clothing::{Clothing, NewClothing, UpdateClothing};
use crate::domain::types::{ClothingId, ClothingType, Season};
use crate::forms::clothing::{AddClothingForm, EditClothingForm};
use crate::repository::{ClothingListQuery, ClothingReader, ClothingWriter};
use crate::services::{ServiceError, ServiceResult};

/// Returns every stored clothing item in insertion order.
pub fn list_clothes<R>(repo: &R) -> ServiceResult<Vec<Clothing>>
where
    R: ClothingReader + ?Sized,
{
    repo.list_clothes(ClothingListQuery::new()).map_err(|err| {
        log::error!("Failed to list clothes: {err}");
        ServiceError::from(err)
    })
}

/// Returns the items of the season named by the URL segment.
pub fn list_clothes_by_season<R>(repo: &R, season: &str) -> ServiceResult<Vec<Clothing>>
where
    R: ClothingReader + ?Sized,
{
    let season: Season = season.parse()?;

    repo.list_clothes(ClothingListQuery::new().season(season))
        .map_err(|err| {
            log::error!("Failed to list clothes for season {season}: {err}");
            ServiceError::from(err)
        })
}

/// Returns the items of the clothing type named by the URL segment.
pub fn list_clothes_by_type<R>(repo: &R, clothing_type: &str) -> ServiceResult<Vec<Clothing>>
where
    R: ClothingReader + ?Sized,
{
    let clothing_type: ClothingType = clothing_type.parse()?;

    repo.list_clothes(ClothingListQuery::new().clothing_type(clothing_type))
        .map_err(|err| {
            log::error!("Failed to list clothes of type {clothing_type}: {err}");
            ServiceError::from(err)
        })
}

pub fn get_clothing<R>(repo: &R, id: &str) -> ServiceResult<Clothing>
where
    R: ClothingReader + ?Sized,
{
    let id = ClothingId::parse_uuid(id)?;

    repo.get_clothing_by_id(&id)
        .map_err(|err| {
            log::error!("Failed to load clothing {id}: {err}");
            ServiceError::from(err)
        })?
        .ok_or(ServiceError::NotFound)
}

/// Validates the payload and stores a new clothing item.
pub fn create_clothing<R>(repo: &R, form: AddClothingForm) -> ServiceResult<Clothing>
where
    R: ClothingWriter + ?Sized,
{
    let new_clothing = NewClothing::try_from(form).map_err(|err| {
        log::error!("Failed to validate clothing: {err}");
        ServiceError::from(err)
    })?;

    repo.create_clothing(&new_clothing).map_err(|err| {
        log::error!("Failed to add clothing: {err}");
        ServiceError::from(err)
    })
}

/// Applies the present fields of the payload to an existing item.
pub fn update_clothing<R>(repo: &R, id: &str, form: EditClothingForm) -> ServiceResult<Clothing>
where
    R: ClothingWriter + ?Sized,
{
    let id = ClothingId::parse_uuid(id)?;
    let updates = UpdateClothing::try_from(form).map_err(|err| {
        log::error!("Failed to validate clothing update: {err}");
        ServiceError::from(err)
    })?;

    repo.update_clothing(&id, &updates).map_err(|err| {
        log::error!("Failed to update clothing {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn delete_clothing<R>(repo: &R, id: &str) -> ServiceResult<()>
where
    R: ClothingWriter + ?Sized,
{
    let id = ClothingId::parse_uuid(id)?;

    repo.delete_clothing(&id).map_err(|err| {
        log::error!("Failed to delete clothing {id}: {err}");
        ServiceError::from(err)
    })
}
