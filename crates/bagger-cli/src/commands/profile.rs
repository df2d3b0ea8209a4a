//! Profile CLI commands
//!
//! Handles: bagger profile list/show

use anyhow::Result;
use bagger_core::Profile;
use clap::Subcommand;

use super::{print_json, show_id, Context};

/// Profile commands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// List a user's active profiles
    List {
        /// Profile owner's username
        username: String,
    },
    /// Show profile details
    Show {
        /// Profile ID
        id: i64,
    },
}

/// Execute profile command
pub fn execute(ctx: &Context, cmd: ProfileCommands) -> Result<()> {
    let bagger = ctx.bagger();

    match cmd {
        ProfileCommands::List { username } => {
            let profiles = bagger.find_profiles_by_username(&username)?;
            if ctx.json {
                return print_json(&profiles);
            }

            if profiles.is_empty() {
                println!("No profiles found.");
            } else {
                println!("Profiles:");
                for p in &profiles {
                    println!(
                        "  {} - {} / {} ({})",
                        show_id(p.id),
                        p.project.name,
                        p.contact.person.full_name(),
                        p.created_on
                    );
                }
            }
            Ok(())
        }
        ProfileCommands::Show { id } => {
            let profile = bagger.load_profile(id)?;
            if ctx.json {
                return print_json(&profile);
            }
            print_profile(&profile);
            Ok(())
        }
    }
}

fn print_profile(p: &Profile) {
    println!("Profile: {}", show_id(p.id));
    println!("Username: {}", p.username);
    println!("Status: {}", p.status);
    println!("Created: {}", p.created_on);
    println!("Project: {}", p.project.name);
    println!("\nOwner:");
    println!("  {}", p.person.person.full_name());
    println!("  {}", p.person.organization.name);
    println!("  {} / {}", p.person.email, p.person.telephone);
    println!("\nContact:");
    println!("  {}", p.contact.person.full_name());
    println!("  {}", p.contact.organization.name);
    println!("  {} / {}", p.contact.email, p.contact.telephone);
}
