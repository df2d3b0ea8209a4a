//! Bagger entities
//!
//! Graphs are plain owned values: a [`Profile`] owns its contacts and project,
//! and a [`Contact`] owns its person and organization. The store assembles
//! them eagerly on load.

mod contact;
mod link;
mod organization;
mod person;
mod profile;
mod project;

pub use contact::{Contact, ContactRecord};
pub use link::{PersonProject, UserContact};
pub use organization::Organization;
pub use person::Person;
pub use profile::{Profile, ProfileRecord, ProfileStatus};
pub use project::Project;
