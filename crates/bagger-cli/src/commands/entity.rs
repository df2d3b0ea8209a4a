//! Person and contact lookups
//!
//! Handles: bagger person show, bagger contact show

use anyhow::Result;
use clap::Subcommand;

use super::{print_json, show_id, Context};

/// Person commands
#[derive(Subcommand)]
pub enum PersonCommands {
    /// Show one person
    Show {
        /// Person ID
        id: i64,
    },
}

/// Contact commands
#[derive(Subcommand)]
pub enum ContactCommands {
    /// Show one contact with its person and organization
    Show {
        /// Contact ID
        id: i64,
    },
}

pub fn execute_person(ctx: &Context, cmd: PersonCommands) -> Result<()> {
    match cmd {
        PersonCommands::Show { id } => {
            let person = ctx.bagger().load_person(id)?;
            if ctx.json {
                return print_json(&person);
            }
            println!("Person: {}", person.full_name());
            println!("ID: {}", show_id(person.id));
            Ok(())
        }
    }
}

pub fn execute_contact(ctx: &Context, cmd: ContactCommands) -> Result<()> {
    match cmd {
        ContactCommands::Show { id } => {
            let contact = ctx.bagger().load_contact(id)?;
            if ctx.json {
                return print_json(&contact);
            }
            println!("Contact: {}", contact.person.full_name());
            println!("ID: {}", show_id(contact.id));
            println!(
                "Organization: {} ({})",
                contact.organization.name,
                show_id(contact.organization.id)
            );
            println!("Email: {}", contact.email);
            println!("Telephone: {}", contact.telephone);
            Ok(())
        }
    }
}
