use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClothingId, ClothingLabel, ClothingType, Season};

/// Image shown for items that carry no `image_url` of their own.
const PLACEHOLDER_IMAGE_BASE: &str = "https://picsum.photos/seed";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Clothing {
    pub id: ClothingId,
    pub label: ClothingLabel,
    pub clothing_type: ClothingType,
    pub season: Season,
    pub wear_count: u32,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Clothing {
    /// Image to render for the item, falling back to a placeholder seeded by
    /// the item id.
    pub fn display_image_url(&self) -> String {
        match &self.image_url {
            Some(url) => url.clone(),
            None => format!("{PLACEHOLDER_IMAGE_BASE}/{}/300/400.jpg", self.id),
        }
    }
}

/// Payload used to create a clothing item. The backend assigns the id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewClothing {
    pub label: ClothingLabel,
    pub clothing_type: ClothingType,
    pub season: Season,
    /// Initial wear count; the backend stores `0` when absent.
    pub wear_count: Option<u32>,
    pub purchase_date: Option<NaiveDate>,
    pub image_url: Option<String>,
}

impl NewClothing {
    #[must_use]
    pub fn new(label: ClothingLabel, clothing_type: ClothingType, season: Season) -> Self {
        Self {
            label,
            clothing_type,
            season,
            wear_count: None,
            purchase_date: None,
            image_url: None,
        }
    }

    #[must_use]
    pub fn wear_count(mut self, wear_count: u32) -> Self {
        self.wear_count = Some(wear_count);
        self
    }

    #[must_use]
    pub fn purchase_date(mut self, date: NaiveDate) -> Self {
        self.purchase_date = Some(date);
        self
    }

    #[must_use]
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into()).filter(|s: &String| !s.trim().is_empty());
        self
    }
}

/// Partial update of a clothing item. Absent fields are left untouched and
/// are omitted from the serialized body.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateClothing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<ClothingLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clothing_type: Option<ClothingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<Season>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wear_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl UpdateClothing {
    #[must_use]
    pub fn label(mut self, label: ClothingLabel) -> Self {
        self.label = Some(label);
        self
    }

    #[must_use]
    pub fn clothing_type(mut self, clothing_type: ClothingType) -> Self {
        self.clothing_type = Some(clothing_type);
        self
    }

    #[must_use]
    pub fn season(mut self, season: Season) -> Self {
        self.season = Some(season);
        self
    }

    #[must_use]
    pub fn wear_count(mut self, wear_count: u32) -> Self {
        self.wear_count = Some(wear_count);
        self
    }

    #[must_use]
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Returns `true` when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.clothing_type.is_none()
            && self.season.is_none()
            && self.wear_count.is_none()
            && self.image_url.is_none()
    }
}
