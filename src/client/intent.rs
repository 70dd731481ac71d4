//! User intents produced by the presentation layer.

use chrono::NaiveDate;

use crate::client::error::ValidationError;
use crate::domain::clothing::{NewClothing, UpdateClothing};
use crate::domain::filter::FilterPatch;
use crate::domain::types::{ClothingId, ClothingLabel, ClothingType, Season, normalize_image_url};

/// Raw contents of the "add clothing" form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClothingDraft {
    pub label: String,
    pub clothing_type: Option<ClothingType>,
    pub season: Option<Season>,
    pub wear_count: Option<u32>,
    pub purchase_date: Option<NaiveDate>,
    pub image_url: Option<String>,
}

impl ClothingDraft {
    /// Checks the required fields and builds the create payload.
    pub fn validate(self) -> Result<NewClothing, ValidationError> {
        let label = ClothingLabel::new(self.label).map_err(|_| ValidationError::EmptyLabel)?;
        let clothing_type = self
            .clothing_type
            .ok_or(ValidationError::MissingClothingType)?;
        let season = self.season.ok_or(ValidationError::MissingSeason)?;
        let image_url =
            normalize_image_url(self.image_url).map_err(|_| ValidationError::InvalidImageUrl)?;

        Ok(NewClothing {
            label,
            clothing_type,
            season,
            wear_count: Some(self.wear_count.unwrap_or(0)),
            purchase_date: self.purchase_date,
            image_url,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Load,
    Add(ClothingDraft),
    Edit(ClothingId, UpdateClothing),
    /// `confirmed` records the user's answer to the confirmation prompt.
    Delete { id: ClothingId, confirmed: bool },
    IncrementWear(ClothingId),
    SetFilter(FilterPatch),
}
