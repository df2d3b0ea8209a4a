//! Person storage operations

use crate::model::Person;
use crate::storage::error::{StoreError, StoreResult};
use rusqlite::{params, Connection, Row};

pub(crate) const ENTITY: &str = "person";

/// Person table operations
pub struct PersonStore<'a> {
    conn: &'a Connection,
}

impl<'a> PersonStore<'a> {
    /// Create a new person store
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Get a person by ID
    ///
    /// # Errors
    /// Returns an error if the query fails
    pub fn get(&self, id: i64) -> StoreResult<Option<Person>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, first_name, middle_init, last_name FROM person WHERE id = ?1
            ",
        )?;

        match stmt.query_row(params![id], person_from_row) {
            Ok(person) => Ok(Some(person)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Insert a person, returning the generated ID
    ///
    /// # Errors
    /// Returns an error if the insert fails
    pub fn insert(&self, person: &Person) -> StoreResult<i64> {
        self.conn
            .execute(
                r"
                INSERT INTO person (first_name, middle_init, last_name)
                VALUES (?1, ?2, ?3)
                ",
                params![person.first_name, person.middle_init, person.last_name],
            )
            .map_err(|e| StoreError::write(ENTITY, e))?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Update the person stored under `id`
    ///
    /// # Errors
    /// Returns an error if the update fails or no row has that ID
    pub fn update(&self, id: i64, person: &Person) -> StoreResult<()> {
        let updated = self
            .conn
            .execute(
                r"
                UPDATE person
                SET first_name = ?1, middle_init = ?2, last_name = ?3
                WHERE id = ?4
                ",
                params![person.first_name, person.middle_init, person.last_name, id],
            )
            .map_err(|e| StoreError::write(ENTITY, e))?;

        if updated == 0 {
            return Err(StoreError::NotFound { entity: ENTITY, id });
        }

        Ok(())
    }
}

fn person_from_row(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: Some(row.get(0)?),
        first_name: row.get(1)?,
        middle_init: row.get(2)?,
        last_name: row.get(3)?,
    })
}
