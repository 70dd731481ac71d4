use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::clothing::{NewClothing, UpdateClothing};
use crate::domain::types::{ClothingLabel, ClothingType, Season, normalize_image_url};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Body of `POST /api/clothes`.
pub struct AddClothingForm {
    /// Display name of the new item.
    #[validate(length(min = 1, max = 200))]
    pub label: String,
    pub clothing_type: ClothingType,
    pub season: Season,
    /// Initial wear count, `0` when omitted. Bounded by the storage column.
    #[validate(range(max = 2147483647))]
    #[serde(default)]
    pub wear_count: Option<u32>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    /// Blank values are treated as absent.
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
/// Body of `PUT /api/clothes/{id}`; every field is optional.
pub struct EditClothingForm {
    #[validate(length(min = 1, max = 200))]
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub clothing_type: Option<ClothingType>,
    #[serde(default)]
    pub season: Option<Season>,
    #[validate(range(max = 2147483647))]
    #[serde(default)]
    pub wear_count: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl TryFrom<AddClothingForm> for NewClothing {
    type Error = FormError;

    fn try_from(form: AddClothingForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let label = ClothingLabel::new(form.label).map_err(|_| FormError::InvalidLabel)?;
        let image_url = normalize_image_url(form.image_url).map_err(|_| FormError::InvalidUrl)?;

        Ok(NewClothing {
            label,
            clothing_type: form.clothing_type,
            season: form.season,
            wear_count: form.wear_count,
            purchase_date: form.purchase_date,
            image_url,
        })
    }
}

impl TryFrom<EditClothingForm> for UpdateClothing {
    type Error = FormError;

    fn try_from(form: EditClothingForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let label = form
            .label
            .map(ClothingLabel::new)
            .transpose()
            .map_err(|_| FormError::InvalidLabel)?;
        let image_url = normalize_image_url(form.image_url).map_err(|_| FormError::InvalidUrl)?;

        Ok(UpdateClothing {
            label,
            clothing_type: form.clothing_type,
            season: form.season,
            wear_count: form.wear_count,
            image_url,
        })
    }
}
