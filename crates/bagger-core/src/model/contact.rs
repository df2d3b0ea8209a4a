//! Contact entity

use serde::{Deserialize, Serialize};

use super::{Organization, Person};

/// A person at an organization, with their contact details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Surrogate key, `None` until first stored
    #[serde(default)]
    pub id: Option<i64>,
    /// The person this contact describes
    pub person: Person,
    /// The organization the person belongs to
    pub organization: Organization,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Telephone number
    #[serde(default)]
    pub telephone: String,
}

impl Contact {
    /// Create an unsaved contact
    #[must_use]
    pub fn new(person: Person, organization: Organization) -> Self {
        Self {
            id: None,
            person,
            organization,
            email: String::new(),
            telephone: String::new(),
        }
    }

    /// Set the email address
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the telephone number
    #[must_use]
    pub fn with_telephone(mut self, telephone: impl Into<String>) -> Self {
        self.telephone = telephone.into();
        self
    }
}

/// A `contact` row as stored, with foreign keys instead of nested values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    pub id: Option<i64>,
    pub person_id: i64,
    pub organization_id: i64,
    pub email: String,
    pub telephone: String,
}
