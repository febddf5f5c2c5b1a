//! Opaque document identifier.
//!
//! The storage backend assigns each document an identifier in whatever
//! native representation it uses. That representation never crosses the
//! persistence boundary: it is converted to a [`DocumentId`] - an opaque
//! string - as soon as a document leaves the store, and that string is what
//! the public API exposes as `id`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A store-assigned document identifier, exposed externally as opaque text.
///
/// A `DocumentId` is distinct from a product's `slug`: the slug is a
/// human-chosen URL handle, the id is whatever the store generated. Two ids
/// compare equal iff their textual forms are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wrap the textual form of a store-assigned identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}
