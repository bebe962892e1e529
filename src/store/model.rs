//! Card and list types shared by the store and the HTTP layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for a card or a list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Generate a fresh random identifier (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// A unit of content with a title and a body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: Identifier,
    pub title: String,
    pub content: String,
}

/// A named, ordered group of card references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: Identifier,
    pub header: String,
    /// Duplicate-free; every entry referenced an existing card when the
    /// list was created.
    pub card_ids: Vec<Identifier>,
}

/// Request body for `POST /card`. Fields stay optional so that missing
/// values are reported by validation rather than by the JSON decoder.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NewCard {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Request body for `POST /list`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewList {
    pub header: Option<String>,
    pub card_ids: Option<Vec<Identifier>>,
}
