//! Payload validation for card and list creation.
//!
//! Shape checks are pure and run before the store is touched. The
//! reference check needs to see the card collection, so it takes a lookup
//! closure and is invoked by the store while it holds the write lock.

use std::collections::HashSet;
use thiserror::Error;

use crate::store::model::{Identifier, NewCard, NewList};

/// Reasons a create request is rejected. All of them surface to clients as
/// `400 Invalid data`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("card id {0} does not reference an existing card")]
    InvalidReference(Identifier),

    #[error("card id {0} is listed more than once")]
    DuplicateReference(Identifier),

    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

/// A card payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCard {
    pub title: String,
    pub content: String,
}

/// A list payload whose shape passed validation. References are checked
/// separately against the card collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidList {
    pub header: String,
    pub card_ids: Vec<Identifier>,
}

pub fn validate_new_card(payload: NewCard) -> Result<ValidCard, ValidationError> {
    let title = required(payload.title, "title")?;
    let content = required(payload.content, "content")?;
    Ok(ValidCard { title, content })
}

pub fn validate_new_list(payload: NewList) -> Result<ValidList, ValidationError> {
    let header = required(payload.header, "header")?;
    let card_ids = payload.card_ids.unwrap_or_default();

    let mut seen = HashSet::with_capacity(card_ids.len());
    for id in &card_ids {
        if !seen.insert(id) {
            return Err(ValidationError::DuplicateReference(id.clone()));
        }
    }

    Ok(ValidList { header, card_ids })
}

/// Fails on the first id for which `card_exists` returns false.
pub fn check_card_references<F>(card_ids: &[Identifier], card_exists: F) -> Result<(), ValidationError>
where
    F: Fn(&Identifier) -> bool,
{
    match card_ids.iter().find(|id| !card_exists(id)) {
        Some(missing) => Err(ValidationError::InvalidReference(missing.clone())),
        None => Ok(()),
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}
