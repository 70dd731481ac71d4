//! Filter predicates deriving the visible subset of the wardrobe.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::domain::clothing::Clothing;
use crate::domain::types::{ClothingType, Season, TypeConstraintError};

/// Either every value or exactly one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Choice<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(expected) => expected == value,
        }
    }
}

impl<T> From<Option<T>> for Choice<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Choice::All, Choice::Only)
    }
}

impl<T: Display> Display for Choice<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Choice::All => f.write_str("all"),
            Choice::Only(value) => value.fmt(f),
        }
    }
}

/// Parses `"all"` (or an empty select value) as [`Choice::All`].
impl<T> FromStr for Choice<T>
where
    T: FromStr<Err = TypeConstraintError>,
{
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(Choice::All),
            other => other.parse().map(Choice::Only),
        }
    }
}

/// Active filters of the wardrobe view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    pub clothing_type: Choice<ClothingType>,
    pub season: Choice<Season>,
    /// Case-insensitive substring matched against the label.
    pub search: String,
}

impl FilterState {
    /// All three predicates must hold.
    pub fn matches(&self, item: &Clothing) -> bool {
        self.clothing_type.matches(&item.clothing_type)
            && self.season.matches(&item.season)
            && (self.search.is_empty()
                || item
                    .label
                    .to_lowercase()
                    .contains(&self.search.to_lowercase()))
    }

    /// Returns the matching items in their original order.
    pub fn apply<'a, I>(&self, items: I) -> Vec<Clothing>
    where
        I: IntoIterator<Item = &'a Clothing>,
    {
        items
            .into_iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }

    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(clothing_type) = patch.clothing_type {
            self.clothing_type = clothing_type;
        }
        if let Some(season) = patch.season {
            self.season = season;
        }
        if let Some(search) = patch.search {
            self.search = search;
        }
    }
}

/// Partial filter change; `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub clothing_type: Option<Choice<ClothingType>>,
    pub season: Option<Choice<Season>>,
    pub search: Option<String>,
}

impl FilterPatch {
    #[must_use]
    pub fn clothing_type(mut self, clothing_type: Choice<ClothingType>) -> Self {
        self.clothing_type = Some(clothing_type);
        self
    }

    #[must_use]
    pub fn season(mut self, season: Choice<Season>) -> Self {
        self.season = Some(season);
        self
    }

    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}
