//! In-memory card and list storage.
//!
//! # Data Flow
//! ```text
//! JSON payload (NewCard / NewList)
//!     → validation.rs (required fields, duplicate ids)
//!     → memory.rs (reference check + insert under one write lock)
//!     → Card / List returned to the handler
//!
//! DELETE card:
//!     memory.rs removes the card
//!     → strips its id from every list's card_ids (same write lock)
//! ```
//!
//! # Design Decisions
//! - Both collections sit behind a single `RwLock` so that cascades and
//!   reference checks never observe a half-applied mutation
//! - Identifiers are strings everywhere, including seed data
//! - Insertion order is preserved for listing

pub mod error;
pub mod memory;
pub mod model;
pub mod validation;

pub use error::StoreError;
pub use memory::Store;
pub use model::{Card, Identifier, List, NewCard, NewList};
pub use validation::{ValidCard, ValidList, ValidationError};
