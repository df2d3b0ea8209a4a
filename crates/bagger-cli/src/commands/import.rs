//! Batch import
//!
//! Handles: bagger import <file>

use anyhow::{anyhow, Context as _, Result};
use bagger_core::Profile;
use serde_json::json;
use std::path::{Path, PathBuf};

use super::{print_json, show_id, Context};

/// Store every profile in `file`, then report ids and the replay log path
pub fn execute(ctx: &Context, file: &Path, output: Option<PathBuf>) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let mut profiles: Vec<Profile> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid profile batch in {}", file.display()))?;

    let output_dir = output.unwrap_or_else(|| ctx.settings.output_dir.clone());
    let outcome = ctx.bagger().store_bagger_updates(&mut profiles, &output_dir);
    let stored = &profiles[..outcome.profiles_stored];

    if ctx.json {
        print_json(&json!({
            "profiles_stored": outcome.profiles_stored,
            "profile_ids": stored.iter().map(|p| p.id).collect::<Vec<_>>(),
            "replay_path": outcome.replay_path,
            "statements": outcome.replay.len(),
            "message": outcome.message,
        }))?;
    } else {
        for p in stored {
            println!("Stored profile {} for {}", show_id(p.id), p.username);
        }
        if let Some(path) = &outcome.replay_path {
            println!("Replay log: {} ({} statements)", path.display(), outcome.replay.len());
        }
    }

    match outcome.message {
        Some(message) => Err(anyhow!(message)),
        None => Ok(()),
    }
}
