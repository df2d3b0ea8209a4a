//! Profile entity

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{Contact, Project};

/// Whether a profile is offered to its user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProfileStatus {
    /// Listed for the user
    #[default]
    #[serde(rename = "A")]
    Active,
    /// Retired, kept for history
    #[serde(rename = "I")]
    Inactive,
}

impl ProfileStatus {
    /// Single-letter code stored in the `status` column
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            ProfileStatus::Active => "A",
            ProfileStatus::Inactive => "I",
        }
    }

    /// Parse a stored status code
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(ProfileStatus::Active),
            "I" => Some(ProfileStatus::Inactive),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileStatus::Active => write!(f, "active"),
            ProfileStatus::Inactive => write!(f, "inactive"),
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A user's bag metadata template: who they are, who to contact, and which
/// project the bags belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Surrogate key, `None` until first stored
    #[serde(default)]
    pub id: Option<i64>,
    /// Login name of the profile owner
    pub username: String,
    /// The owner's own contact record
    pub person: Contact,
    /// Project bags are sent for
    pub project: Project,
    /// Secondary contact
    pub contact: Contact,
    /// Active or inactive
    #[serde(default)]
    pub status: ProfileStatus,
    /// Creation date
    #[serde(default = "today")]
    pub created_on: NaiveDate,
}

impl Profile {
    /// Create an unsaved, active profile dated today
    #[must_use]
    pub fn new(username: impl Into<String>, person: Contact, project: Project, contact: Contact) -> Self {
        Self {
            id: None,
            username: username.into(),
            person,
            project,
            contact,
            status: ProfileStatus::Active,
            created_on: today(),
        }
    }

    /// Set the creation date
    #[must_use]
    pub fn with_created_on(mut self, created_on: NaiveDate) -> Self {
        self.created_on = created_on;
        self
    }

    /// Set the status
    #[must_use]
    pub fn with_status(mut self, status: ProfileStatus) -> Self {
        self.status = status;
        self
    }
}

/// A `profile` row as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRecord {
    pub id: Option<i64>,
    pub username: String,
    /// Contact id of the owner
    pub profile_person_id: i64,
    pub project_id: i64,
    /// Contact id of the secondary contact
    pub contact_id: i64,
    pub status: ProfileStatus,
    pub created_on: NaiveDate,
}
