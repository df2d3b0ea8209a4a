//! Profile store façade
//!
//! [`Bagger`] is the entry point callers use: it hydrates full entity
//! graphs on load and performs create-or-update writes, mirroring each
//! committed write into a caller-supplied [`ReplayLog`].
//!
//! Each public operation runs in its own transaction. Nothing spans more
//! than one call, so a caller driving several writes gets no rollback of
//! the earlier ones when a later one fails.

use rusqlite::Connection;

use crate::model::{
    Contact, ContactRecord, Organization, Person, PersonProject, Profile, ProfileRecord,
    Project, UserContact,
};
use crate::replay::{self, ReplayLog};
use crate::storage::contacts::{self, ContactStore};
use crate::storage::db::Database;
use crate::storage::error::{StoreError, StoreResult};
use crate::storage::links::LinkStore;
use crate::storage::organizations::{self, OrganizationStore};
use crate::storage::people::{self, PersonStore};
use crate::storage::profiles::{self, ProfileStore};
use crate::storage::projects::{self, ProjectStore};

/// A committed write: the row id and its replay statement
struct Written {
    id: i64,
    statement: String,
}

/// Persistence façade over people, organizations, contacts, projects and
/// profiles
pub struct Bagger<'a> {
    conn: &'a Connection,
}

impl<'a> Bagger<'a> {
    /// Create a façade over an open database
    #[must_use]
    pub fn new(db: &'a Database) -> Self {
        Self {
            conn: db.connection(),
        }
    }

    fn in_transaction<T>(&self, op: impl FnOnce(&Connection) -> StoreResult<T>) -> StoreResult<T> {
        let tx = self.conn.unchecked_transaction()?;
        let value = op(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    // ---------------------------------------------------------------
    // Loads
    // ---------------------------------------------------------------

    /// Load a person by ID
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no such person exists, or
    /// [`StoreError::Query`] if the read fails
    pub fn load_person(&self, id: i64) -> StoreResult<Person> {
        self.in_transaction(|conn| fetch_person(conn, id))
    }

    /// Load an organization by ID
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no such organization exists, or
    /// [`StoreError::Query`] if the read fails
    pub fn load_organization(&self, id: i64) -> StoreResult<Organization> {
        self.in_transaction(|conn| fetch_organization(conn, id))
    }

    /// Load a project by ID
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no such project exists, or
    /// [`StoreError::Query`] if the read fails
    pub fn load_project(&self, id: i64) -> StoreResult<Project> {
        self.in_transaction(|conn| fetch_project(conn, id))
    }

    /// Load a contact with its person and organization
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the contact or one of its
    /// references is missing, or [`StoreError::Query`] if a read fails
    pub fn load_contact(&self, id: i64) -> StoreResult<Contact> {
        self.in_transaction(|conn| fetch_contact(conn, id))
    }

    /// Load a profile with both contacts and its project
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if the profile or one of its
    /// references is missing, or [`StoreError::Query`] if a read fails
    pub fn load_profile(&self, id: i64) -> StoreResult<Profile> {
        self.in_transaction(|conn| fetch_profile(conn, id))
    }

    // ---------------------------------------------------------------
    // Upserts
    // ---------------------------------------------------------------

    /// Update the person if its ID names an existing row, insert it otherwise
    ///
    /// On insert the generated ID is written back into `person`.
    ///
    /// # Errors
    /// Returns [`StoreError::Write`] if the update fails, or
    /// [`StoreError::Unsupported`] if the insert fails
    pub fn upsert_person(&self, person: &mut Person, log: &mut ReplayLog) -> StoreResult<i64> {
        let written = self.in_transaction(|conn| {
            let store = PersonStore::new(conn);
            match existing_id(person.id, |id| store.get(id))? {
                Some(id) => {
                    store.update(id, person)?;
                    Ok(Written {
                        id,
                        statement: replay::update_person(id, person),
                    })
                }
                None => {
                    let id = escalate(people::ENTITY, store.insert(person))?;
                    Ok(Written {
                        id,
                        statement: replay::insert_person(id, person),
                    })
                }
            }
        })?;

        person.id = Some(written.id);
        log.push(written.statement);
        Ok(written.id)
    }

    /// Update the organization if its ID names an existing row, insert it
    /// otherwise
    ///
    /// # Errors
    /// Returns [`StoreError::Write`] if the update fails, or
    /// [`StoreError::Unsupported`] if the insert fails
    pub fn upsert_organization(
        &self,
        org: &mut Organization,
        log: &mut ReplayLog,
    ) -> StoreResult<i64> {
        let written = self.in_transaction(|conn| {
            let store = OrganizationStore::new(conn);
            match existing_id(org.id, |id| store.get(id))? {
                Some(id) => {
                    store.update(id, org)?;
                    Ok(Written {
                        id,
                        statement: replay::update_organization(id, org),
                    })
                }
                None => {
                    let id = escalate(organizations::ENTITY, store.insert(org))?;
                    Ok(Written {
                        id,
                        statement: replay::insert_organization(id, org),
                    })
                }
            }
        })?;

        org.id = Some(written.id);
        log.push(written.statement);
        Ok(written.id)
    }

    /// Update or insert a contact row
    ///
    /// The contact's person and organization must already be stored; only
    /// their IDs are written.
    ///
    /// # Errors
    /// Returns [`StoreError::Unsupported`] if a reference is unstored or the
    /// insert fails, or [`StoreError::Write`] if the update fails
    pub fn upsert_contact(&self, contact: &mut Contact, log: &mut ReplayLog) -> StoreResult<i64> {
        let record = ContactRecord {
            id: contact.id,
            person_id: stored_id(contacts::ENTITY, "person", contact.person.id)?,
            organization_id: stored_id(contacts::ENTITY, "organization", contact.organization.id)?,
            email: contact.email.clone(),
            telephone: contact.telephone.clone(),
        };

        let written = self.in_transaction(|conn| {
            let store = ContactStore::new(conn);
            match existing_id(record.id, |id| store.get(id))? {
                Some(id) => {
                    store.update(id, &record)?;
                    Ok(Written {
                        id,
                        statement: replay::update_contact(id, &record),
                    })
                }
                None => {
                    let id = escalate(contacts::ENTITY, store.insert(&record))?;
                    Ok(Written {
                        id,
                        statement: replay::insert_contact(id, &record),
                    })
                }
            }
        })?;

        contact.id = Some(written.id);
        log.push(written.statement);
        Ok(written.id)
    }

    /// Update the project if its ID names an existing row, insert it otherwise
    ///
    /// # Errors
    /// Returns [`StoreError::Write`] if the update fails, or
    /// [`StoreError::Unsupported`] if the insert fails
    pub fn upsert_project(&self, project: &mut Project, log: &mut ReplayLog) -> StoreResult<i64> {
        let written = self.in_transaction(|conn| {
            let store = ProjectStore::new(conn);
            match existing_id(project.id, |id| store.get(id))? {
                Some(id) => {
                    store.update(id, project)?;
                    Ok(Written {
                        id,
                        statement: replay::update_project(id, project),
                    })
                }
                None => {
                    let id = escalate(projects::ENTITY, store.insert(project))?;
                    Ok(Written {
                        id,
                        statement: replay::insert_project(id, project),
                    })
                }
            }
        })?;

        project.id = Some(written.id);
        log.push(written.statement);
        Ok(written.id)
    }

    /// Update or insert a profile row
    ///
    /// Foreign keys are taken from the IDs currently held by the nested
    /// owner contact, secondary contact and project, which must all be
    /// stored. An update never changes the creation date; the stored one is
    /// copied back into `profile`.
    ///
    /// # Errors
    /// Returns [`StoreError::Unsupported`] if a reference is unstored or the
    /// insert fails, or [`StoreError::Write`] if the update fails
    pub fn upsert_profile(&self, profile: &mut Profile, log: &mut ReplayLog) -> StoreResult<i64> {
        let record = ProfileRecord {
            id: profile.id,
            username: profile.username.clone(),
            profile_person_id: stored_id(profiles::ENTITY, "person contact", profile.person.id)?,
            project_id: stored_id(profiles::ENTITY, "project", profile.project.id)?,
            contact_id: stored_id(profiles::ENTITY, "contact", profile.contact.id)?,
            status: profile.status,
            created_on: profile.created_on,
        };

        let (written, created_on) = self.in_transaction(|conn| {
            let store = ProfileStore::new(conn);
            let stored = match record.id {
                Some(id) => store.get(id)?.map(|row| (id, row.created_on)),
                None => None,
            };
            match stored {
                // The stored creation date wins over the caller's
                Some((id, created_on)) => {
                    store.update(id, &record)?;
                    let written = Written {
                        id,
                        statement: replay::update_profile(id, &record),
                    };
                    Ok((written, created_on))
                }
                None => {
                    let id = escalate(profiles::ENTITY, store.insert(&record))?;
                    let written = Written {
                        id,
                        statement: replay::insert_profile(id, &record),
                    };
                    Ok((written, record.created_on))
                }
            }
        })?;

        profile.id = Some(written.id);
        profile.created_on = created_on;
        log.push(written.statement);
        Ok(written.id)
    }

    // ---------------------------------------------------------------
    // Join rows
    // ---------------------------------------------------------------

    // TODO: return join-table write failures to the caller the way the core
    // upserts do, once the GUI can display them.

    /// Link a stored person to a stored project
    ///
    /// Failures are logged and reported as `None`; they never abort the caller.
    pub fn store_person_project(
        &self,
        person: &Person,
        project: &Project,
        log: &mut ReplayLog,
    ) -> Option<PersonProject> {
        let result = stored_id("person project", "person", person.id).and_then(|person_id| {
            let project_id = stored_id("person project", "project", project.id)?;
            self.in_transaction(|conn| LinkStore::new(conn).insert_person_project(person_id, project_id))
        });

        match result {
            Ok(link) => {
                log.push(replay::insert_person_project(&link));
                Some(link)
            }
            Err(e) => {
                tracing::warn!(error = %e, "person project link not stored");
                None
            }
        }
    }

    /// Link a username to a stored contact
    ///
    /// Failures are logged and reported as `None`; they never abort the caller.
    pub fn store_user_contact(
        &self,
        username: &str,
        contact: &Contact,
        log: &mut ReplayLog,
    ) -> Option<UserContact> {
        let result = stored_id("user contact", "contact", contact.id).and_then(|contact_id| {
            self.in_transaction(|conn| LinkStore::new(conn).insert_user_contact(username, contact_id))
        });

        match result {
            Ok(link) => {
                log.push(replay::insert_user_contact(&link));
                Some(link)
            }
            Err(e) => {
                tracing::warn!(username, error = %e, "user contact link not stored");
                None
            }
        }
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    /// All organizations ordered by name
    ///
    /// # Errors
    /// Returns an error if the query fails
    pub fn list_organizations(&self) -> StoreResult<Vec<Organization>> {
        self.in_transaction(|conn| OrganizationStore::new(conn).list())
    }

    /// Organizations whose name starts with `prefix`, ordered by name
    ///
    /// # Errors
    /// Returns an error if the query fails
    pub fn find_organizations_by_prefix(&self, prefix: &str) -> StoreResult<Vec<Organization>> {
        self.in_transaction(|conn| OrganizationStore::new(conn).find_by_prefix(prefix))
    }

    /// All projects ordered by name
    ///
    /// # Errors
    /// Returns an error if the query fails
    pub fn list_projects(&self) -> StoreResult<Vec<Project>> {
        self.in_transaction(|conn| ProjectStore::new(conn).list())
    }

    /// Active profiles owned by `username`, each fully hydrated
    ///
    /// # Errors
    /// Returns an error if a query fails or a profile references a missing row
    pub fn find_profiles_by_username(&self, username: &str) -> StoreResult<Vec<Profile>> {
        self.in_transaction(|conn| {
            ProfileStore::new(conn)
                .list_active_for_user(username)?
                .into_iter()
                .map(|record| hydrate_profile(conn, record))
                .collect()
        })
    }

    /// Projects linked to a person, in link order
    ///
    /// # Errors
    /// Returns an error if a query fails or a link references a missing project
    pub fn find_projects_for_person(&self, person_id: i64) -> StoreResult<Vec<Project>> {
        self.in_transaction(|conn| {
            LinkStore::new(conn)
                .person_projects(person_id)?
                .into_iter()
                .map(|link| fetch_project(conn, link.project_id))
                .collect()
        })
    }

    /// Contacts linked to a username, in link order
    ///
    /// # Errors
    /// Returns an error if a query fails or a link references a missing contact
    pub fn contacts_for_user(&self, username: &str) -> StoreResult<Vec<Contact>> {
        self.in_transaction(|conn| {
            LinkStore::new(conn)
                .user_contacts(username)?
                .into_iter()
                .map(|link| fetch_contact(conn, link.contact_id))
                .collect()
        })
    }
}

/// Resolve an entity's ID to an existing row ID, or `None` if it must be
/// inserted
fn existing_id<T>(
    id: Option<i64>,
    get: impl FnOnce(i64) -> StoreResult<Option<T>>,
) -> StoreResult<Option<i64>> {
    match id {
        Some(id) => Ok(get(id)?.map(|_| id)),
        None => Ok(None),
    }
}

/// Core entity inserts are the last resort: a failure here stops the caller
fn escalate(entity: &'static str, result: StoreResult<i64>) -> StoreResult<i64> {
    result.map_err(|e| {
        tracing::error!(entity, error = %e, "insert failed");
        StoreError::Unsupported {
            entity,
            reason: e.to_string(),
        }
    })
}

fn stored_id(entity: &'static str, reference: &str, id: Option<i64>) -> StoreResult<i64> {
    id.ok_or_else(|| StoreError::Unsupported {
        entity,
        reason: format!("{reference} has not been stored"),
    })
}

fn fetch_person(conn: &Connection, id: i64) -> StoreResult<Person> {
    PersonStore::new(conn).get(id)?.ok_or(StoreError::NotFound {
        entity: people::ENTITY,
        id,
    })
}

fn fetch_organization(conn: &Connection, id: i64) -> StoreResult<Organization> {
    OrganizationStore::new(conn).get(id)?.ok_or(StoreError::NotFound {
        entity: organizations::ENTITY,
        id,
    })
}

fn fetch_project(conn: &Connection, id: i64) -> StoreResult<Project> {
    ProjectStore::new(conn).get(id)?.ok_or(StoreError::NotFound {
        entity: projects::ENTITY,
        id,
    })
}

fn fetch_contact(conn: &Connection, id: i64) -> StoreResult<Contact> {
    let record = ContactStore::new(conn).get(id)?.ok_or(StoreError::NotFound {
        entity: contacts::ENTITY,
        id,
    })?;

    Ok(Contact {
        id: record.id,
        person: fetch_person(conn, record.person_id)?,
        organization: fetch_organization(conn, record.organization_id)?,
        email: record.email,
        telephone: record.telephone,
    })
}

fn fetch_profile(conn: &Connection, id: i64) -> StoreResult<Profile> {
    let record = ProfileStore::new(conn).get(id)?.ok_or(StoreError::NotFound {
        entity: profiles::ENTITY,
        id,
    })?;
    hydrate_profile(conn, record)
}

fn hydrate_profile(conn: &Connection, record: ProfileRecord) -> StoreResult<Profile> {
    Ok(Profile {
        id: record.id,
        username: record.username,
        person: fetch_contact(conn, record.profile_person_id)?,
        project: fetch_project(conn, record.project_id)?,
        contact: fetch_contact(conn, record.contact_id)?,
        status: record.status,
        created_on: record.created_on,
    })
}
