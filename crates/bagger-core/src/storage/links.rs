//! Join table operations (`person_projects`, `user_contact`)

use crate::model::{PersonProject, UserContact};
use crate::storage::error::{StoreError, StoreResult};
use rusqlite::{params, Connection};

/// Join table operations
pub struct LinkStore<'a> {
    conn: &'a Connection,
}

impl<'a> LinkStore<'a> {
    /// Create a new link store
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Link a person to a project, returning the join row
    ///
    /// # Errors
    /// Returns an error if the insert fails
    pub fn insert_person_project(&self, person_id: i64, project_id: i64) -> StoreResult<PersonProject> {
        self.conn
            .execute(
                r"
                INSERT INTO person_projects (person_id, project_id) VALUES (?1, ?2)
                ",
                params![person_id, project_id],
            )
            .map_err(|e| StoreError::write("person project", e))?;

        Ok(PersonProject {
            id: self.conn.last_insert_rowid(),
            person_id,
            project_id,
        })
    }

    /// Join rows for a person, in insertion order
    ///
    /// # Errors
    /// Returns an error if the query fails
    pub fn person_projects(&self, person_id: i64) -> StoreResult<Vec<PersonProject>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, person_id, project_id FROM person_projects
            WHERE person_id = ?1
            ORDER BY id
            ",
        )?;

        let rows = stmt.query_map(params![person_id], |row| {
            Ok(PersonProject {
                id: row.get(0)?,
                person_id: row.get(1)?,
                project_id: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Link a username to a contact, returning the join row
    ///
    /// # Errors
    /// Returns an error if the insert fails
    pub fn insert_user_contact(&self, username: &str, contact_id: i64) -> StoreResult<UserContact> {
        self.conn
            .execute(
                r"
                INSERT INTO user_contact (username, contact_id) VALUES (?1, ?2)
                ",
                params![username, contact_id],
            )
            .map_err(|e| StoreError::write("user contact", e))?;

        Ok(UserContact {
            id: self.conn.last_insert_rowid(),
            username: username.to_string(),
            contact_id,
        })
    }

    /// Join rows for a username, in insertion order
    ///
    /// # Errors
    /// Returns an error if the query fails
    pub fn user_contacts(&self, username: &str) -> StoreResult<Vec<UserContact>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, username, contact_id FROM user_contact
            WHERE username = ?1
            ORDER BY id
            ",
        )?;

        let rows = stmt.query_map(params![username], |row| {
            Ok(UserContact {
                id: row.get(0)?,
                username: row.get(1)?,
                contact_id: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
