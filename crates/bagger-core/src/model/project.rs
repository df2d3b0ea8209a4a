//! Project entity

use serde::{Deserialize, Serialize};

/// A transfer project profiles are bound to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Surrogate key, `None` until first stored
    #[serde(default)]
    pub id: Option<i64>,
    /// Project name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
}

impl Project {
    /// Create an unsaved project
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
