//! Organization storage operations

use crate::model::Organization;
use crate::storage::error::{StoreError, StoreResult};
use rusqlite::{params, Connection, Row};

pub(crate) const ENTITY: &str = "organization";

/// Organization table operations
pub struct OrganizationStore<'a> {
    conn: &'a Connection,
}

impl<'a> OrganizationStore<'a> {
    /// Create a new organization store
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Get an organization by ID
    ///
    /// # Errors
    /// Returns an error if the query fails
    pub fn get(&self, id: i64) -> StoreResult<Option<Organization>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, name, address FROM organization WHERE id = ?1
            ",
        )?;

        match stmt.query_row(params![id], organization_from_row) {
            Ok(org) => Ok(Some(org)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all organizations ordered by name
    ///
    /// # Errors
    /// Returns an error if the organizations cannot be listed
    pub fn list(&self) -> StoreResult<Vec<Organization>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, name, address FROM organization ORDER BY name, id
            ",
        )?;

        let rows = stmt.query_map([], organization_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// List organizations whose name starts with `prefix`, ordered by name
    ///
    /// The match is literal and case-sensitive.
    ///
    /// # Errors
    /// Returns an error if the query fails
    pub fn find_by_prefix(&self, prefix: &str) -> StoreResult<Vec<Organization>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, name, address FROM organization
            WHERE substr(name, 1, length(?1)) = ?1
            ORDER BY name, id
            ",
        )?;

        let rows = stmt.query_map(params![prefix], organization_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Insert an organization, returning the generated ID
    ///
    /// # Errors
    /// Returns an error if the insert fails
    pub fn insert(&self, org: &Organization) -> StoreResult<i64> {
        self.conn
            .execute(
                r"
                INSERT INTO organization (name, address) VALUES (?1, ?2)
                ",
                params![org.name, org.address],
            )
            .map_err(|e| StoreError::write(ENTITY, e))?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Update the organization stored under `id`
    ///
    /// # Errors
    /// Returns an error if the update fails or no row has that ID
    pub fn update(&self, id: i64, org: &Organization) -> StoreResult<()> {
        let updated = self
            .conn
            .execute(
                r"
                UPDATE organization SET name = ?1, address = ?2 WHERE id = ?3
                ",
                params![org.name, org.address, id],
            )
            .map_err(|e| StoreError::write(ENTITY, e))?;

        if updated == 0 {
            return Err(StoreError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }
}

fn organization_from_row(row: &Row<'_>) -> rusqlite::Result<Organization> {
    Ok(Organization {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        address: row.get(2)?,
    })
}
