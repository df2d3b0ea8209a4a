//! Batch storage of profile graphs
//!
//! Stores every entity reachable from a list of profiles in dependency
//! order, then flushes the replay log of the batch to `bagger.sql`.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::model::Profile;
use crate::replay::ReplayLog;
use crate::storage::{Bagger, StoreResult};

/// What a batch did
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    /// Profiles whose whole graph was stored
    pub profiles_stored: usize,
    /// Every statement committed during the batch
    pub replay: ReplayLog,
    /// Where the replay log was written, if it was
    pub replay_path: Option<PathBuf>,
    /// `None` on full success, otherwise a description of what went wrong
    pub message: Option<String>,
}

impl BatchOutcome {
    /// Whether every profile was stored and the replay log was written
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.message.is_none()
    }
}

impl Bagger<'_> {
    /// Store each profile graph in order, then write the replay log to
    /// `<output_dir>/bagger.sql`
    ///
    /// Per profile the order is: both contacts' people, both contacts'
    /// organizations, the owner contact, the secondary contact, the project,
    /// then the profile row itself with its foreign keys taken from the
    /// freshly stored references.
    ///
    /// The first failure stops the batch; later profiles are not attempted
    /// and earlier writes stay committed. The replay log is written either
    /// way so the file records exactly what was committed. Failures are
    /// reported in [`BatchOutcome::message`], never returned as errors.
    pub fn store_bagger_updates(&self, profiles: &mut [Profile], output_dir: &Path) -> BatchOutcome {
        let mut log = ReplayLog::new();
        let mut profiles_stored = 0;
        let mut store_failure = None;

        for profile in profiles.iter_mut() {
            if let Err(e) = self.store_profile_graph(profile, &mut log) {
                tracing::error!(username = %profile.username, error = %e, "batch stopped");
                store_failure = Some(format!(
                    "storing profile for '{}' failed: {e}",
                    profile.username
                ));
                break;
            }
            profiles_stored += 1;
        }

        let (replay_path, write_failure) = match log.write_to(output_dir) {
            Ok(path) => (Some(path), None),
            Err(e) => {
                tracing::error!(error = %e, "replay log not written");
                (
                    None,
                    Some(format!("{} write failed: {e}", ReplayLog::REPLAY_FILE_NAME)),
                )
            }
        };

        let message = match (store_failure, write_failure) {
            (None, None) => None,
            (Some(m), None) | (None, Some(m)) => Some(m),
            (Some(store), Some(write)) => Some(format!("{store}; {write}")),
        };

        tracing::info!(
            profiles = profiles.len(),
            profiles_stored,
            statements = log.len(),
            success = message.is_none(),
            "batch complete"
        );

        BatchOutcome {
            profiles_stored,
            replay: log,
            replay_path,
            message,
        }
    }

    fn store_profile_graph(&self, profile: &mut Profile, log: &mut ReplayLog) -> StoreResult<()> {
        self.upsert_person(&mut profile.person.person, log)?;
        self.upsert_person(&mut profile.contact.person, log)?;
        self.upsert_organization(&mut profile.person.organization, log)?;
        self.upsert_organization(&mut profile.contact.organization, log)?;
        self.upsert_contact(&mut profile.person, log)?;
        self.upsert_contact(&mut profile.contact, log)?;
        self.upsert_project(&mut profile.project, log)?;
        self.upsert_profile(profile, log)?;
        Ok(())
    }
}
