//! CLI subcommand implementations

pub mod entity;
pub mod import;
pub mod org;
pub mod profile;
pub mod project;

use anyhow::{Context as _, Result};
use bagger_core::{Bagger, Database, Settings};
use serde::Serialize;

/// What every command runs against: resolved settings and an open database
pub struct Context {
    pub settings: Settings,
    pub json: bool,
    db: Database,
}

impl Context {
    /// Open (creating if needed) the configured database
    pub fn open(settings: Settings, json: bool) -> Result<Self> {
        if let Some(parent) = settings.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let db = Database::open(&settings.database_path).with_context(|| {
            format!("Failed to open database {}", settings.database_path.display())
        })?;

        Ok(Self { settings, json, db })
    }

    pub fn bagger(&self) -> Bagger<'_> {
        Bagger::new(&self.db)
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Display form of an optional row id
pub fn show_id(id: Option<i64>) -> String {
    id.map_or_else(|| "-".to_string(), |id| id.to_string())
}
