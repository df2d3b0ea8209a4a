//! SQL replay log
//!
//! Every write the store performs is mirrored here as a literal SQL
//! statement with all values inlined, so the batch can be audited by eye
//! or re-run against an empty schema. A [`ReplayLog`] is an ordinary value
//! owned by the caller of a batch and threaded through each write.

use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{ContactRecord, Organization, Person, PersonProject, ProfileRecord, Project, UserContact};
use crate::storage::{StoreError, StoreResult};

/// Ordered list of executed statements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplayLog {
    statements: Vec<String>,
}

impl ReplayLog {
    /// File name the log is flushed to inside the output directory
    pub const REPLAY_FILE_NAME: &'static str = "bagger.sql";

    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one statement
    pub fn push(&mut self, statement: String) {
        tracing::debug!(%statement, "replay");
        self.statements.push(statement);
    }

    /// Statements in execution order
    #[must_use]
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Render the log as file contents: one statement per line
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for statement in &self.statements {
            out.push_str(statement);
            out.push('\n');
        }
        out
    }

    /// Write the log to `<dir>/bagger.sql`, replacing any existing file
    ///
    /// # Errors
    /// Returns [`StoreError::Io`] if the file cannot be written
    pub fn write_to(&self, dir: &Path) -> StoreResult<PathBuf> {
        let path = dir.join(Self::REPLAY_FILE_NAME);
        tracing::debug!(path = %path.display(), statements = self.len(), "writing replay log");

        fs::write(&path, self.render()).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

/// Quote a string as a SQL literal
///
/// Control characters are spliced in as `char(N)` so a statement never
/// spans more than one line: `"a\nb"` renders as `'a' || char(10) || 'b'`.
fn text(value: &str) -> String {
    let mut parts = Vec::new();
    let mut literal = String::new();

    for c in value.chars() {
        if c.is_control() {
            if !literal.is_empty() {
                parts.push(quote(&literal));
                literal.clear();
            }
            parts.push(format!("char({})", u32::from(c)));
        } else {
            literal.push(c);
        }
    }

    if !literal.is_empty() || parts.is_empty() {
        parts.push(quote(&literal));
    }
    parts.join(" || ")
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn opt_text(value: Option<&str>) -> String {
    value.map_or_else(|| "NULL".to_string(), text)
}

fn date(value: NaiveDate) -> String {
    text(&value.format("%Y-%m-%d").to_string())
}

pub(crate) fn insert_person(id: i64, person: &Person) -> String {
    format!(
        "INSERT INTO person VALUES ({id}, {}, {}, {});",
        text(&person.first_name),
        opt_text(person.middle_init.as_deref()),
        text(&person.last_name),
    )
}

pub(crate) fn update_person(id: i64, person: &Person) -> String {
    format!(
        "UPDATE person SET first_name={}, middle_init={}, last_name={} WHERE id={id};",
        text(&person.first_name),
        opt_text(person.middle_init.as_deref()),
        text(&person.last_name),
    )
}

pub(crate) fn insert_organization(id: i64, org: &Organization) -> String {
    format!(
        "INSERT INTO organization VALUES ({id}, {}, {});",
        text(&org.name),
        text(&org.address),
    )
}

pub(crate) fn update_organization(id: i64, org: &Organization) -> String {
    format!(
        "UPDATE organization SET name={}, address={} WHERE id={id};",
        text(&org.name),
        text(&org.address),
    )
}

pub(crate) fn insert_contact(id: i64, record: &ContactRecord) -> String {
    format!(
        "INSERT INTO contact VALUES ({id}, {}, {}, {}, {});",
        record.person_id,
        record.organization_id,
        text(&record.email),
        text(&record.telephone),
    )
}

pub(crate) fn update_contact(id: i64, record: &ContactRecord) -> String {
    format!(
        "UPDATE contact SET person_id={}, organization_id={}, email={}, telephone={} WHERE id={id};",
        record.person_id,
        record.organization_id,
        text(&record.email),
        text(&record.telephone),
    )
}

pub(crate) fn insert_project(id: i64, project: &Project) -> String {
    format!(
        "INSERT INTO projects VALUES ({id}, {}, {});",
        text(&project.name),
        opt_text(project.description.as_deref()),
    )
}

pub(crate) fn update_project(id: i64, project: &Project) -> String {
    format!(
        "UPDATE projects SET name={}, description={} WHERE id={id};",
        text(&project.name),
        opt_text(project.description.as_deref()),
    )
}

pub(crate) fn insert_profile(id: i64, record: &ProfileRecord) -> String {
    format!(
        "INSERT INTO profile VALUES ({id}, {}, {}, {}, {}, {}, {});",
        text(&record.username),
        record.profile_person_id,
        record.project_id,
        record.contact_id,
        text(record.status.code()),
        date(record.created_on),
    )
}

pub(crate) fn update_profile(id: i64, record: &ProfileRecord) -> String {
    format!(
        "UPDATE profile SET username={}, profile_person_id={}, project_id={}, contact_id={}, status={} WHERE id={id};",
        text(&record.username),
        record.profile_person_id,
        record.project_id,
        record.contact_id,
        text(record.status.code()),
    )
}

pub(crate) fn insert_person_project(link: &PersonProject) -> String {
    format!(
        "INSERT INTO person_projects VALUES ({}, {}, {});",
        link.id, link.person_id, link.project_id
    )
}

pub(crate) fn insert_user_contact(link: &UserContact) -> String {
    format!(
        "INSERT INTO user_contact VALUES ({}, {}, {});",
        link.id,
        text(&link.username),
        link.contact_id
    )
}
