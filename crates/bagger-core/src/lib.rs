//! Bagger Core - profile, contact and organization storage
//!
//! This crate provides the Bagger entity model, `SQLite` storage with
//! create-or-update writes, the SQL replay log those writes produce, batch
//! storage of whole profile graphs, and settings/logging setup.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod batch;
pub mod config;
pub mod logging;
pub mod model;
pub mod replay;
pub mod storage;

pub use batch::BatchOutcome;
pub use config::Settings;
pub use model::{Contact, Organization, Person, Profile, ProfileStatus, Project};
pub use replay::ReplayLog;
pub use storage::{Bagger, Database, StoreError, StoreResult};
