//! Application configuration
//!
//! Settings are layered from TOML files: later files override earlier ones,
//! then `${NAME}` placeholders in string values are resolved against the
//! other keys and the environment.

mod error;
mod settings;

pub use error::{ConfigError, ConfigResult};
pub use settings::Settings;
