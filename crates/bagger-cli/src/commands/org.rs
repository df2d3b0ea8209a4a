//! Organization CLI commands
//!
//! Handles: bagger org list/find/show

use anyhow::Result;
use bagger_core::Organization;
use clap::Subcommand;

use super::{print_json, show_id, Context};

/// Organization commands
#[derive(Subcommand)]
pub enum OrgCommands {
    /// List all organizations
    List,
    /// Find organizations whose name starts with a prefix
    Find {
        /// Case-sensitive name prefix
        prefix: String,
    },
    /// Show one organization
    Show {
        /// Organization ID
        id: i64,
    },
}

/// Execute organization command
pub fn execute(ctx: &Context, cmd: OrgCommands) -> Result<()> {
    let bagger = ctx.bagger();

    match cmd {
        OrgCommands::List => print_list(ctx, &bagger.list_organizations()?),
        OrgCommands::Find { prefix } => {
            print_list(ctx, &bagger.find_organizations_by_prefix(&prefix)?)
        }
        OrgCommands::Show { id } => {
            let org = bagger.load_organization(id)?;
            if ctx.json {
                return print_json(&org);
            }
            println!("Organization: {}", org.name);
            println!("ID: {}", show_id(org.id));
            println!("Address: {}", org.address);
            Ok(())
        }
    }
}

fn print_list(ctx: &Context, orgs: &[Organization]) -> Result<()> {
    if ctx.json {
        return print_json(orgs);
    }

    if orgs.is_empty() {
        println!("No organizations found.");
    } else {
        println!("Organizations:");
        for org in orgs {
            println!("  {} - {} ({})", show_id(org.id), org.name, org.address);
        }
    }
    Ok(())
}
