//! UUID identifier value object.
//!
//! # Invariants
//! - The wrapped string is always a hyphenated, syntactically valid UUID.
//! - The string is kept exactly as supplied; equality compares it verbatim.

use crate::model::value_object::ValueObject;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

const HYPHENATED_LEN: usize = 36;

/// Raised when an identifier is built from a malformed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ID must be a valid UUID")]
pub struct InvalidIdentifierError {
    /// Rejected input, kept for diagnostics.
    pub value: String,
}

/// Validated entity identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Generates a fresh random (v4) identifier.
    pub fn new() -> Self {
        let value = Uuid::new_v4().to_string();
        debug_assert!(validate(&value).is_ok());
        Self(value)
    }

    /// Builds an identifier from an existing value.
    ///
    /// # Errors
    /// - Returns `InvalidIdentifierError` when `value` is not a hyphenated UUID.
    pub fn parse(value: impl Into<String>) -> Result<Self, InvalidIdentifierError> {
        let value = value.into();
        validate(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueObject for Identifier {}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identifier {
    type Err = InvalidIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = InvalidIdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}

fn validate(value: &str) -> Result<(), InvalidIdentifierError> {
    // `Uuid::try_parse` also accepts simple, braced and urn forms.
    if value.len() != HYPHENATED_LEN || Uuid::try_parse(value).is_err() {
        return Err(InvalidIdentifierError {
            value: value.to_string(),
        });
    }
    Ok(())
}
