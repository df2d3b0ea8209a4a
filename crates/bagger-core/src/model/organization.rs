//! Organization entity

use serde::{Deserialize, Serialize};

/// An organization a contact belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Surrogate key, `None` until first stored
    #[serde(default)]
    pub id: Option<i64>,
    /// Organization name
    pub name: String,
    /// Postal address
    #[serde(default)]
    pub address: String,
}

impl Organization {
    /// Create an unsaved organization
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            address: address.into(),
        }
    }
}
