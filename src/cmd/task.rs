//! Task listing and lifecycle commands.

use anyhow::Result;
use console::style;

use taskboard::models::{Task, TaskStatus};

use super::{bootstrap, require_login};
use crate::{Cli, TaskCommands};

pub async fn cmd_task(cli: &Cli, command: &TaskCommands) -> Result<()> {
    let ctx = bootstrap(cli)?;
    require_login(&ctx.stores).await?;
    let tasks = &ctx.stores.tasks;

    match command {
        TaskCommands::List { project_id } => {
            tasks.fetch_project_tasks(project_id).await;
            print_tasks(&tasks.state().project_tasks);
        }
        TaskCommands::Today => {
            tasks.fetch_today_tasks().await;
            print_tasks(&tasks.state().today_tasks);
        }
        TaskCommands::Create {
            project_id,
            title,
            description,
            deadline,
        } => {
            tasks.begin_create(Some(project_id));
            tasks.modify_draft(|t| {
                t.title = Some(title.clone());
                if let Some(description) = description {
                    t.description = Some(description.clone());
                }
                if let Some(deadline) = deadline {
                    t.deadline = Some(deadline.clone());
                }
            });
            tasks.save_task().await;
            println!("Created task {}", style(title).bold());
        }
        TaskCommands::Close { project_id, id } => {
            tasks.fetch_project_tasks(project_id).await;
            let Some(task) = tasks
                .state()
                .project_tasks
                .into_iter()
                .find(|t| t.id.as_deref() == Some(id.as_str()))
            else {
                anyhow::bail!("Task {id} not found in project {project_id}");
            };
            let closed = Task {
                status: Some(TaskStatus::Closed),
                completed: Some(true),
                completion_date: Some(chrono::Utc::now()),
                ..task
            };
            tasks.update_task(Some(closed)).await;
            println!("Closed task {id}");
        }
        TaskCommands::Remove { project_id, id } => {
            tasks.fetch_project_tasks(project_id).await;
            tasks.remove_task(id).await;
            println!("Removed task {id}");
        }
    }

    Ok(())
}

fn print_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    println!();
    println!("{:<26} {:<30} {:<13} Status", "Id", "Title", "Deadline");
    for task in tasks {
        let status = match task.status {
            Some(TaskStatus::New) | None => "new",
            Some(TaskStatus::InProgress) => "in progress",
            Some(TaskStatus::Closed) => "closed",
        };
        println!(
            "{:<26} {:<30} {:<13} {}",
            style(task.id.as_deref().unwrap_or("-")).dim(),
            task.title.as_deref().unwrap_or("(untitled)"),
            task.deadline.as_deref().unwrap_or("-"),
            status
        );
    }
    println!();
}
