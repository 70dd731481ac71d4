//! Diesel models for stored clothing items.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::{
    clothing::{
        Clothing as DomainClothing, NewClothing as DomainNewClothing,
        UpdateClothing as DomainUpdateClothing,
    },
    types::{ClothingId, ClothingLabel, TypeConstraintError},
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clothes)]
/// Diesel model for [`crate::domain::clothing::Clothing`].
pub struct Clothing {
    pub id: i32,
    pub public_id: String,
    pub label: String,
    pub clothing_type: String,
    pub season: String,
    pub wear_count: i32,
    pub purchase_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clothes)]
/// Insertable form of [`Clothing`].
pub struct NewClothing<'a> {
    pub public_id: &'a str,
    pub label: &'a str,
    pub clothing_type: &'a str,
    pub season: &'a str,
    pub wear_count: i32,
    pub purchase_date: Option<NaiveDate>,
    pub image_url: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clothes)]
/// Data used when patching a [`Clothing`] record. `None` columns are skipped.
pub struct UpdateClothing<'a> {
    pub label: Option<&'a str>,
    pub clothing_type: Option<&'static str>,
    pub season: Option<&'static str>,
    pub wear_count: Option<i32>,
    pub image_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

/// Saturates counters that do not fit the SQLite integer column.
fn wear_count_to_db(wear_count: u32) -> i32 {
    i32::try_from(wear_count).unwrap_or(i32::MAX)
}

impl TryFrom<Clothing> for DomainClothing {
    type Error = TypeConstraintError;

    fn try_from(clothing: Clothing) -> Result<Self, Self::Error> {
        let wear_count = u32::try_from(clothing.wear_count).map_err(|_| {
            TypeConstraintError::InvalidValue(format!("wear count {}", clothing.wear_count))
        })?;

        Ok(Self {
            id: ClothingId::new(clothing.public_id)?,
            label: ClothingLabel::new(clothing.label)?,
            clothing_type: clothing.clothing_type.parse()?,
            season: clothing.season.parse()?,
            wear_count,
            purchase_date: clothing.purchase_date,
            image_url: clothing.image_url,
        })
    }
}

impl<'a> NewClothing<'a> {
    /// Builds the row for `clothing` under the freshly minted `public_id`.
    pub fn from_domain(public_id: &'a ClothingId, clothing: &'a DomainNewClothing) -> Self {
        Self {
            public_id: public_id.as_str(),
            label: clothing.label.as_str(),
            clothing_type: clothing.clothing_type.as_str(),
            season: clothing.season.as_str(),
            wear_count: wear_count_to_db(clothing.wear_count.unwrap_or(0)),
            purchase_date: clothing.purchase_date,
            image_url: clothing.image_url.as_deref(),
        }
    }
}

impl<'a> UpdateClothing<'a> {
    pub fn from_domain(updates: &'a DomainUpdateClothing, updated_at: NaiveDateTime) -> Self {
        Self {
            label: updates.label.as_ref().map(ClothingLabel::as_str),
            clothing_type: updates.clothing_type.map(|kind| kind.as_str()),
            season: updates.season.map(|season| season.as_str()),
            wear_count: updates.wear_count.map(wear_count_to_db),
            image_url: updates.image_url.as_deref(),
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::{ClothingType, Season};

    fn row() -> Clothing {
        Clothing {
            id: 1,
            public_id: "8d5e0b0e-7a35-4c56-9d6f-1d0a0f2b9c11".into(),
            label: "Blue Shirt".into(),
            clothing_type: "top".into(),
            season: "summer".into(),
            wear_count: 3,
            purchase_date: NaiveDate::from_ymd_opt(2023, 5, 17),
            image_url: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn from_row_into_domain() {
        let domain = DomainClothing::try_from(row()).expect("valid row");
        assert_eq!(domain.id.as_str(), "8d5e0b0e-7a35-4c56-9d6f-1d0a0f2b9c11");
        assert_eq!(domain.label.as_str(), "Blue Shirt");
        assert_eq!(domain.clothing_type, ClothingType::Top);
        assert_eq!(domain.season, Season::Summer);
        assert_eq!(domain.wear_count, 3);
    }

    #[test]
    fn corrupt_rows_are_rejected() {
        let mut bad_season = row();
        bad_season.season = "monsoon".into();
        assert!(DomainClothing::try_from(bad_season).is_err());

        let mut negative = row();
        negative.wear_count = -1;
        assert!(DomainClothing::try_from(negative).is_err());
    }

    #[test]
    fn from_domain_new_defaults_wear_count() {
        let public_id = ClothingId::generate();
        let domain = DomainNewClothing::new(
            ClothingLabel::new("Coat").unwrap(),
            ClothingType::Outerwear,
            Season::Winter,
        );
        let new = NewClothing::from_domain(&public_id, &domain);
        assert_eq!(new.public_id, public_id.as_str());
        assert_eq!(new.clothing_type, "outerwear");
        assert_eq!(new.season, "winter");
        assert_eq!(new.wear_count, 0);
        assert_eq!(new.image_url, None);
    }

    #[test]
    fn from_domain_update_keeps_absent_fields_unset() {
        let domain = DomainUpdateClothing::default().wear_count(u32::MAX);
        let update = UpdateClothing::from_domain(&domain, Utc::now().naive_utc());
        assert_eq!(update.wear_count, Some(i32::MAX));
        assert!(update.label.is_none());
        assert!(update.season.is_none());
    }
}
