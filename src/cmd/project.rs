//! Project listing, creation, and removal.

use anyhow::Result;
use console::style;

use taskboard::models::{Project, ProjectsFilter};

use super::{bootstrap, require_login};
use crate::{Cli, ProjectCommands};

pub async fn cmd_project(cli: &Cli, command: &ProjectCommands) -> Result<()> {
    let ctx = bootstrap(cli)?;
    require_login(&ctx.stores).await?;
    let projects = &ctx.stores.projects;

    match command {
        ProjectCommands::List { title, favorite } => {
            if title.is_some() || *favorite {
                let filter = ProjectsFilter {
                    title: title.clone(),
                    favorite: favorite.then_some(true),
                    ..Default::default()
                };
                projects.fetch_projects(Some(filter)).await;
            } else {
                // The plain listing doubles as the main screen, so pull the
                // favorites alongside the full list.
                projects.fetch_overview().await;
            }

            let state = projects.state();
            if state.projects.is_empty() {
                println!("No projects found.");
                return Ok(());
            }
            if !state.favorite_projects.is_empty() {
                println!();
                println!("{}", style("Favorites").bold());
                for project in &state.favorite_projects {
                    print_project_row(project);
                }
            }
            println!();
            println!("{:<26} {:<25} {:<13} Fav", "Id", "Title", "Deadline");
            for project in &state.projects {
                print_project_row(project);
            }
            println!();
        }
        ProjectCommands::Show { id } => {
            projects.open_project(id).await;
            let Some(project) = projects.state().project else {
                anyhow::bail!("Project {id} not found");
            };
            println!();
            println!("{}", style(project.title.as_deref().unwrap_or("(untitled)")).bold());
            if let Some(description) = &project.description {
                println!("{description}");
            }
            println!("Deadline: {}", project.deadline.as_deref().unwrap_or("-"));
            println!("Color:    {}", project.color.as_deref().unwrap_or("-"));
            println!("Favorite: {}", project.favorite.unwrap_or(false));
            println!();
        }
        ProjectCommands::Create {
            title,
            description,
            color,
            deadline,
            favorite,
        } => {
            projects.begin_create();
            projects.modify_draft(|p| {
                p.title = Some(title.clone());
                if let Some(description) = description {
                    p.description = Some(description.clone());
                }
                if let Some(color) = color {
                    p.color = Some(color.clone());
                }
                if let Some(deadline) = deadline {
                    p.deadline = Some(deadline.clone());
                }
                if *favorite {
                    p.favorite = Some(true);
                }
            });
            projects.save_project().await;
            println!("Created project {}", style(title).bold());
        }
        ProjectCommands::Remove { id } => {
            projects.remove_project(id).await;
            println!("Removed project {id}");
        }
    }

    Ok(())
}

fn print_project_row(project: &Project) {
    println!(
        "{:<26} {:<25} {:<13} {}",
        style(project.id.as_deref().unwrap_or("-")).dim(),
        project.title.as_deref().unwrap_or("(untitled)"),
        project.deadline.as_deref().unwrap_or("-"),
        if project.favorite.unwrap_or(false) {
            "*"
        } else {
            ""
        }
    );
}
