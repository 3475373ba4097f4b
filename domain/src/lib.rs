//! Domain library for the two-tier item lookup.
//!
//! Holds the item type, the store port (trait) and error definitions, plus the
//! service that falls back from a primary store to a secondary one. Keep
//! process and IO concerns out of this crate.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Identifier of an item within a store.
pub type ItemId = i64;

/// A stored record. Stores hand out clones; a returned item is never mutated
/// behind the caller's back.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
}

impl Item {
    pub fn new<S: Into<String>>(id: ItemId, name: S) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Which store tier answered a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Primary,
    Secondary,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Primary => "primary",
            Tier::Secondary => "secondary",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store port: lookup and delete by id.
///
/// A miss is `Ok(None)`, not an error. `Err` is reserved for failures of the
/// store itself.
pub trait ItemRepository: Send + Sync {
    /// First item with the given id, in collection order.
    fn get_item_by_id(&self, id: ItemId) -> Result<Option<Item>, CoreError>;
    /// Remove the first item with the given id and return it.
    fn delete_item(&self, id: ItemId) -> Result<Option<Item>, CoreError>;
}

impl<R: ItemRepository + ?Sized> ItemRepository for &R {
    fn get_item_by_id(&self, id: ItemId) -> Result<Option<Item>, CoreError> {
        (**self).get_item_by_id(id)
    }

    fn delete_item(&self, id: ItemId) -> Result<Option<Item>, CoreError> {
        (**self).delete_item(id)
    }
}

impl<R: ItemRepository + ?Sized> ItemRepository for Arc<R> {
    fn get_item_by_id(&self, id: ItemId) -> Result<Option<Item>, CoreError> {
        (**self).get_item_by_id(id)
    }

    fn delete_item(&self, id: ItemId) -> Result<Option<Item>, CoreError> {
        (**self).delete_item(id)
    }
}

/// Core domain errors (no external error crates to keep deps small).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The id is in neither the primary nor the secondary store.
    NotFound,
    Repository(String),
}

impl Display for CoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::NotFound => write!(f, "Item not found in both repositories"),
            CoreError::Repository(msg) => write!(f, "repository error: {}", msg),
        }
    }
}

impl Error for CoreError {}

pub mod adapters;
pub mod service;
