//! Join rows

use serde::{Deserialize, Serialize};

/// Links a person to a project they work on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonProject {
    pub id: i64,
    pub person_id: i64,
    pub project_id: i64,
}

/// Links a login username to a contact record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContact {
    pub id: i64,
    pub username: String,
    pub contact_id: i64,
}
