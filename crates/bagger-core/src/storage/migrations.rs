//! Database migrations

use rusqlite::Connection;

use super::error::{StoreError, StoreResult};

const CURRENT_VERSION: i32 = 1;

/// Run all pending migrations
///
/// # Errors
/// Returns an error if migrations fail
pub fn run_migrations(conn: &Connection) -> StoreResult<()> {
    let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version > CURRENT_VERSION {
        return Err(StoreError::Migration(format!(
            "database schema version {version} is newer than supported version {CURRENT_VERSION}"
        )));
    }

    if version < 1 {
        migrate_v1(conn)?;
    }

    conn.pragma_update(None, "user_version", CURRENT_VERSION)?;
    Ok(())
}

// Column order is part of the replay format: `INSERT INTO t VALUES (...)`
// statements in bagger.sql rely on it.
fn migrate_v1(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS person (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            middle_init TEXT,
            last_name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS organization (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            address TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS contact (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            person_id INTEGER NOT NULL REFERENCES person(id),
            organization_id INTEGER NOT NULL REFERENCES organization(id),
            email TEXT NOT NULL DEFAULT '',
            telephone TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS projects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT
        );

        CREATE TABLE IF NOT EXISTS profile (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL,
            profile_person_id INTEGER NOT NULL REFERENCES contact(id),
            project_id INTEGER NOT NULL REFERENCES projects(id),
            contact_id INTEGER NOT NULL REFERENCES contact(id),
            status TEXT NOT NULL DEFAULT 'A' CHECK (status IN ('A', 'I')),
            created_on TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS person_projects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            person_id INTEGER NOT NULL REFERENCES person(id),
            project_id INTEGER NOT NULL REFERENCES projects(id)
        );

        CREATE TABLE IF NOT EXISTS user_contact (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL,
            contact_id INTEGER NOT NULL REFERENCES contact(id)
        );

        CREATE INDEX IF NOT EXISTS idx_organization_name ON organization(name);
        CREATE INDEX IF NOT EXISTS idx_profile_username ON profile(username, status);
        CREATE INDEX IF NOT EXISTS idx_person_projects_person ON person_projects(person_id);
        CREATE INDEX IF NOT EXISTS idx_user_contact_username ON user_contact(username);
        ",
    )?;

    Ok(())
}
