//! Contact storage operations
//!
//! Works on [`ContactRecord`] rows; hydration into [`crate::model::Contact`]
//! happens in the [`super::Bagger`] façade.

use crate::model::ContactRecord;
use crate::storage::error::{StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(crate) const ENTITY: &str = "contact";

/// Contact table operations
pub struct ContactStore<'a> {
    conn: &'a Connection,
}

impl<'a> ContactStore<'a> {
    /// Create a new contact store
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Get a contact row by ID
    ///
    /// # Errors
    /// Returns an error if the query fails
    pub fn get(&self, id: i64) -> StoreResult<Option<ContactRecord>> {
        let record = self
            .conn
            .query_row(
                r"
                SELECT id, person_id, organization_id, email, telephone
                FROM contact WHERE id = ?1
                ",
                params![id],
                contact_from_row,
            )
            .optional()?;

        Ok(record)
    }

    /// Insert a contact row, returning the generated ID
    ///
    /// # Errors
    /// Returns an error if the insert fails
    pub fn insert(&self, record: &ContactRecord) -> StoreResult<i64> {
        self.conn
            .execute(
                r"
                INSERT INTO contact (person_id, organization_id, email, telephone)
                VALUES (?1, ?2, ?3, ?4)
                ",
                params![
                    record.person_id,
                    record.organization_id,
                    record.email,
                    record.telephone,
                ],
            )
            .map_err(|e| StoreError::write(ENTITY, e))?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Update the contact row stored under `id`
    ///
    /// # Errors
    /// Returns an error if the update fails or no row has that ID
    pub fn update(&self, id: i64, record: &ContactRecord) -> StoreResult<()> {
        let updated = self
            .conn
            .execute(
                r"
                UPDATE contact
                SET person_id = ?1, organization_id = ?2, email = ?3, telephone = ?4
                WHERE id = ?5
                ",
                params![
                    record.person_id,
                    record.organization_id,
                    record.email,
                    record.telephone,
                    id,
                ],
            )
            .map_err(|e| StoreError::write(ENTITY, e))?;

        if updated == 0 {
            return Err(StoreError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }
}

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<ContactRecord> {
    Ok(ContactRecord {
        id: Some(row.get(0)?),
        person_id: row.get(1)?,
        organization_id: row.get(2)?,
        email: row.get(3)?,
        telephone: row.get(4)?,
    })
}
