//! Storage layer (`SQLite`)
//!
//! One borrowed store per table, plus the [`Bagger`] façade that composes
//! them into whole-graph loads and create-or-update writes.

pub mod bagger;
pub mod contacts;
pub mod db;
pub mod error;
pub mod links;
pub mod migrations;
pub mod organizations;
pub mod people;
pub mod profiles;
pub mod projects;

pub use bagger::Bagger;
pub use contacts::ContactStore;
pub use db::Database;
pub use error::{StoreError, StoreResult};
pub use links::LinkStore;
pub use organizations::OrganizationStore;
pub use people::PersonStore;
pub use profiles::ProfileStore;
pub use projects::ProjectStore;
