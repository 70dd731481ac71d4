//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (non-empty identifiers, trimmed
//! labels, known enumerations) so that once a value reaches the domain layer
//! it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::{ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidateUrl;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Provided url failed format validation.
    #[error("invalid url address")]
    InvalidUrl,
    /// Provided uuid failed format validation.
    #[error("invalid uuid value")]
    InvalidUuid,
}

/// Opaque identifier assigned to a clothing item by the backend.
///
/// The store never interprets the contents; the wardrobe server happens to
/// mint UUIDs but any non-empty string is accepted on the wire.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ClothingId(String);

impl ClothingId {
    /// Wraps a backend-provided identifier, rejecting blank values.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(value))
    }

    /// Mints a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parses an identifier that must be a well-formed UUID.
    pub fn parse_uuid(value: &str) -> Result<Self, TypeConstraintError> {
        let uuid = Uuid::parse_str(value.trim()).map_err(|_| TypeConstraintError::InvalidUuid)?;
        Ok(Self(uuid.to_string()))
    }

    /// Borrow the identifier as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for ClothingId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ClothingId {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ClothingId {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClothingId> for String {
    fn from(value: ClothingId) -> Self {
        value.0
    }
}

/// Display name of a clothing item: trimmed and never empty.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ClothingLabel(String);

impl ClothingLabel {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for ClothingLabel {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ClothingLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ClothingLabel {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ClothingLabel {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClothingLabel> for String {
    fn from(value: ClothingLabel) -> Self {
        value.0
    }
}

/// Kind of garment.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ClothingType {
    Top,
    Bottom,
    Dress,
    Outerwear,
}

impl ClothingType {
    pub const ALL: [ClothingType; 4] = [
        ClothingType::Top,
        ClothingType::Bottom,
        ClothingType::Dress,
        ClothingType::Outerwear,
    ];

    /// Wire name used in JSON payloads and URL segments.
    pub const fn as_str(self) -> &'static str {
        match self {
            ClothingType::Top => "top",
            ClothingType::Bottom => "bottom",
            ClothingType::Dress => "dress",
            ClothingType::Outerwear => "outerwear",
        }
    }
}

impl Display for ClothingType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClothingType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("clothing type `{s}`")))
    }
}

/// Season a garment is meant for.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Season {
    SpringAutumn,
    Summer,
    Winter,
}

impl Season {
    pub const ALL: [Season; 3] = [Season::SpringAutumn, Season::Summer, Season::Winter];

    /// Wire name used in JSON payloads and URL segments.
    pub const fn as_str(self) -> &'static str {
        match self {
            Season::SpringAutumn => "spring-autumn",
            Season::Summer => "summer",
            Season::Winter => "winter",
        }
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|season| season.as_str() == s.trim())
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("season `{s}`")))
    }
}

/// Normalizes an optional image url: blank becomes `None`, anything else
/// must be a valid url.
pub fn normalize_image_url(
    value: Option<String>,
) -> Result<Option<String>, TypeConstraintError> {
    match value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
        Some(url) if url.validate_url() => Ok(Some(url)),
        Some(_) => Err(TypeConstraintError::InvalidUrl),
        None => Ok(None),
    }
}
