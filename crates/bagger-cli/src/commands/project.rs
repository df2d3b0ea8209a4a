//! Project CLI commands
//!
//! Handles: bagger project list/show/for-person/link

use anyhow::{Context as _, Result};
use bagger_core::{Project, ReplayLog};
use clap::Subcommand;
use serde_json::json;
use std::path::PathBuf;

use super::{print_json, show_id, Context};

/// Project commands
#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List all projects
    List,
    /// Show one project
    Show {
        /// Project ID
        id: i64,
    },
    /// List the projects linked to a person
    ForPerson {
        /// Person ID
        person_id: i64,
    },
    /// Link a person to a project
    Link {
        /// Person ID
        #[arg(long)]
        person: i64,
        /// Project ID
        #[arg(long)]
        project: i64,
        /// Directory bagger.sql is written to (defaults to settings)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Execute project command
pub fn execute(ctx: &Context, cmd: ProjectCommands) -> Result<()> {
    let bagger = ctx.bagger();

    match cmd {
        ProjectCommands::List => print_list(ctx, &bagger.list_projects()?, "No projects found."),
        ProjectCommands::Show { id } => {
            let project = bagger.load_project(id)?;
            if ctx.json {
                return print_json(&project);
            }
            println!("Project: {}", project.name);
            println!("ID: {}", show_id(project.id));
            if let Some(desc) = &project.description {
                println!("Description: {desc}");
            }
            Ok(())
        }
        ProjectCommands::ForPerson { person_id } => {
            let projects = bagger.find_projects_for_person(person_id)?;
            print_list(ctx, &projects, "No projects linked to this person.")
        }
        ProjectCommands::Link {
            person,
            project,
            output,
        } => {
            let person = bagger.load_person(person)?;
            let project = bagger.load_project(project)?;

            let mut log = ReplayLog::new();
            let link = bagger
                .store_person_project(&person, &project, &mut log)
                .context("Link was not stored")?;

            let output_dir = output.unwrap_or_else(|| ctx.settings.output_dir.clone());
            let path = log.write_to(&output_dir)?;

            if ctx.json {
                return print_json(&json!({
                    "link": link,
                    "replay_path": path,
                }));
            }
            println!(
                "Linked {} to project '{}' (link {})",
                person.full_name(),
                project.name,
                link.id
            );
            println!("Replay log: {}", path.display());
            Ok(())
        }
    }
}

fn print_list(ctx: &Context, projects: &[Project], empty: &str) -> Result<()> {
    if ctx.json {
        return print_json(projects);
    }

    if projects.is_empty() {
        println!("{empty}");
    } else {
        println!("Projects:");
        for p in projects {
            let desc = p.description.as_deref().unwrap_or("No description");
            println!("  {} - {} ({})", show_id(p.id), p.name, desc);
        }
    }
    Ok(())
}
