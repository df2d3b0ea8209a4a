//! Person entity

use serde::{Deserialize, Serialize};

/// A named individual referenced by contacts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Surrogate key, `None` until first stored
    #[serde(default)]
    pub id: Option<i64>,
    /// Given name
    pub first_name: String,
    /// Middle initial
    #[serde(default)]
    pub middle_init: Option<String>,
    /// Family name
    pub last_name: String,
}

impl Person {
    /// Create an unsaved person
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            middle_init: None,
            last_name: last_name.into(),
        }
    }

    /// Set the middle initial
    #[must_use]
    pub fn with_middle_init(mut self, middle_init: impl Into<String>) -> Self {
        self.middle_init = Some(middle_init.into());
        self
    }

    /// Display name in "First M. Last" form
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.middle_init {
            Some(mi) if !mi.is_empty() => format!("{} {}. {}", self.first_name, mi, self.last_name),
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }
}
