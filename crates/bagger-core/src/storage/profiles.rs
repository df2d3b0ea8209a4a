//! Profile storage operations
//!
//! Works on [`ProfileRecord`] rows; the [`super::Bagger`] façade hydrates
//! them into full [`crate::model::Profile`] graphs.

use crate::model::{ProfileRecord, ProfileStatus};
use crate::storage::error::{StoreError, StoreResult};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(crate) const ENTITY: &str = "profile";

/// Storage format of `profile.created_on`
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Profile table operations
pub struct ProfileStore<'a> {
    conn: &'a Connection,
}

impl<'a> ProfileStore<'a> {
    /// Create a new profile store
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Get a profile row by ID
    ///
    /// # Errors
    /// Returns an error if the query fails or the row is malformed
    pub fn get(&self, id: i64) -> StoreResult<Option<ProfileRecord>> {
        let record = self
            .conn
            .query_row(
                r"
                SELECT id, username, profile_person_id, project_id, contact_id, status, created_on
                FROM profile WHERE id = ?1
                ",
                params![id],
                profile_from_row,
            )
            .optional()?;

        Ok(record)
    }

    /// List the active profile rows owned by `username`, oldest first
    ///
    /// # Errors
    /// Returns an error if the query fails
    pub fn list_active_for_user(&self, username: &str) -> StoreResult<Vec<ProfileRecord>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, username, profile_person_id, project_id, contact_id, status, created_on
            FROM profile
            WHERE status = ?1 AND username = ?2
            ORDER BY id
            ",
        )?;

        let rows = stmt.query_map(
            params![ProfileStatus::Active.code(), username],
            profile_from_row,
        )?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Insert a profile row, returning the generated ID
    ///
    /// # Errors
    /// Returns an error if the insert fails
    pub fn insert(&self, record: &ProfileRecord) -> StoreResult<i64> {
        self.conn
            .execute(
                r"
                INSERT INTO profile
                    (username, profile_person_id, project_id, contact_id, status, created_on)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ",
                params![
                    record.username,
                    record.profile_person_id,
                    record.project_id,
                    record.contact_id,
                    record.status.code(),
                    record.created_on.format(DATE_FORMAT).to_string(),
                ],
            )
            .map_err(|e| StoreError::write(ENTITY, e))?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Update the profile row stored under `id`
    ///
    /// The creation date is never rewritten.
    ///
    /// # Errors
    /// Returns an error if the update fails or no row has that ID
    pub fn update(&self, id: i64, record: &ProfileRecord) -> StoreResult<()> {
        let updated = self
            .conn
            .execute(
                r"
                UPDATE profile
                SET username = ?1, profile_person_id = ?2, project_id = ?3,
                    contact_id = ?4, status = ?5
                WHERE id = ?6
                ",
                params![
                    record.username,
                    record.profile_person_id,
                    record.project_id,
                    record.contact_id,
                    record.status.code(),
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

fn profile_from_row(row: &Row<'_>) -> rusqlite::Result<ProfileRecord> {
    let status: String = row.get(5)?;
    let status = ProfileStatus::from_code(&status).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            Type::Text,
            format!("unknown profile status: {status}").into(),
        )
    })?;

    let created_on: String = row.get(6)?;
    let created_on = NaiveDate::parse_from_str(&created_on, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;

    Ok(ProfileRecord {
        id: Some(row.get(0)?),
        username: row.get(1)?,
        profile_person_id: row.get(2)?,
        project_id: row.get(3)?,
        contact_id: row.get(4)?,
        status,
        created_on,
    })
}
