//! Project storage operations

use crate::model::Project;
use crate::storage::error::{StoreError, StoreResult};
use rusqlite::{params, Connection, Row};

pub(crate) const ENTITY: &str = "project";

/// Project table operations
pub struct ProjectStore<'a> {
    conn: &'a Connection,
}

impl<'a> ProjectStore<'a> {
    /// Create a new project store
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Get a project by ID
    ///
    /// # Errors
    /// Returns an error if the query fails
    pub fn get(&self, id: i64) -> StoreResult<Option<Project>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, name, description FROM projects WHERE id = ?1
            ",
        )?;

        match stmt.query_row(params![id], project_from_row) {
            Ok(project) => Ok(Some(project)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all projects ordered by name
    ///
    /// # Errors
    /// Returns an error if the projects cannot be listed
    pub fn list(&self) -> StoreResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, name, description FROM projects ORDER BY name, id
            ",
        )?;

        let rows = stmt.query_map([], project_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Insert a project, returning the generated ID
    ///
    /// # Errors
    /// Returns an error if the insert fails
    pub fn insert(&self, project: &Project) -> StoreResult<i64> {
        self.conn
            .execute(
                r"
                INSERT INTO projects (name, description) VALUES (?1, ?2)
                ",
                params![project.name, project.description],
            )
            .map_err(|e| StoreError::write(ENTITY, e))?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Update the project stored under `id`
    ///
    /// # Errors
    /// Returns an error if the update fails or no row has that ID
    pub fn update(&self, id: i64, project: &Project) -> StoreResult<()> {
        let updated = self
            .conn
            .execute(
                r"
                UPDATE projects SET name = ?1, description = ?2 WHERE id = ?3
                ",
                params![project.name, project.description, id],
            )
            .map_err(|e| StoreError::write(ENTITY, e))?;

        if updated == 0 {
            return Err(StoreError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
    })
}
