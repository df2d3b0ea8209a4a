//! Layered settings

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::{ConfigError, ConfigResult};
use crate::logging::LogFormat;

const MAX_PLACEHOLDER_DEPTH: usize = 16;

/// Resolved application settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// `SQLite` database file
    pub database_path: PathBuf,
    /// Directory `bagger.sql` is written to
    pub output_dir: PathBuf,
    /// Log output format
    pub log_format: LogFormat,
}

/// Shape of a settings file; every key is optional so files can be partial
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingsFile {
    database_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    log_format: Option<LogFormat>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: Self::data_dir().join("bagger.db"),
            output_dir: PathBuf::from("."),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Settings {
    /// Per-user data directory (`~/.bagger`)
    #[must_use]
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".bagger")
    }

    /// Files consulted when no explicit list is given, lowest precedence first
    #[must_use]
    pub fn default_sources() -> Vec<PathBuf> {
        vec![Self::data_dir().join("bagger.toml"), PathBuf::from("bagger.toml")]
    }

    /// Load settings from `sources`, lowest precedence first
    ///
    /// Missing files are skipped.
    ///
    /// # Errors
    /// Returns an error if a file cannot be read or parsed, or a placeholder
    /// cannot be resolved
    pub fn load(sources: &[PathBuf]) -> ConfigResult<Self> {
        let mut merged = toml::Table::new();

        for path in sources {
            if !path.is_file() {
                tracing::debug!(path = %path.display(), "settings file not present, skipping");
                continue;
            }
            tracing::debug!(path = %path.display(), "loading settings file");
            merge(&mut merged, read_table(path)?);
        }

        resolve_placeholders(&mut merged)?;

        let file: SettingsFile = toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::InvalidSettings(e.to_string()))?;

        let defaults = Self::default();
        Ok(Self {
            database_path: file.database_path.unwrap_or(defaults.database_path),
            output_dir: file.output_dir.unwrap_or(defaults.output_dir),
            log_format: file.log_format.unwrap_or(defaults.log_format),
        })
    }
}

fn read_table(path: &Path) -> ConfigResult<toml::Table> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    content
        .parse::<toml::Table>()
        .map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Overlay `upper` onto `base`; nested tables merge key by key
fn merge(base: &mut toml::Table, upper: toml::Table) {
    for (key, value) in upper {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Expand `${NAME}` in top-level string values
fn resolve_placeholders(table: &mut toml::Table) -> ConfigResult<()> {
    let vars: HashMap<String, String> = table
        .iter()
        .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
        .collect();

    for (key, value) in table.iter_mut() {
        if let toml::Value::String(s) = value {
            *s = expand(key, s, &vars, 0)?;
        }
    }

    Ok(())
}

fn expand(key: &str, input: &str, vars: &HashMap<String, String>, depth: usize) -> ConfigResult<String> {
    if depth > MAX_PLACEHOLDER_DEPTH {
        return Err(ConfigError::PlaceholderCycle {
            key: key.to_string(),
        });
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            // Unterminated: keep the text as written
            out.push_str(&rest[start..]);
            return Ok(out);
        };

        let name = &after[..end];
        out.push_str(&lookup(key, name, vars, depth)?);
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

fn lookup(key: &str, name: &str, vars: &HashMap<String, String>, depth: usize) -> ConfigResult<String> {
    if let Some(value) = vars.get(name) {
        return expand(key, value, vars, depth + 1);
    }
    if let Ok(value) = std::env::var(name) {
        return Ok(value);
    }
    if name == "HOME" {
        if let Some(home) = dirs::home_dir() {
            return Ok(home.display().to_string());
        }
    }

    Err(ConfigError::UnresolvedPlaceholder {
        key: key.to_string(),
        name: name.to_string(),
    })
}
