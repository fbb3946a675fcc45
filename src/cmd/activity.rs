//! Activity feed command.

use anyhow::Result;
use console::style;

use taskboard::models::ActivityType;

use super::{bootstrap, require_login};
use crate::Cli;

pub async fn cmd_activity(cli: &Cli, today: bool, week: bool) -> Result<()> {
    let ctx = bootstrap(cli)?;
    require_login(&ctx.stores).await?;
    let activity = &ctx.stores.activity;

    if today {
        activity.fetch_today().await;
    } else if week {
        activity.fetch_past_week().await;
    } else {
        activity.fetch_all().await;
    }

    let feed = activity.state().activities;
    if feed.is_empty() {
        println!("No activity.");
        return Ok(());
    }
    println!();
    for entry in &feed {
        let verb = entry.kind.map(describe).unwrap_or("did something with");
        println!(
            "{} {}",
            verb,
            style(entry.activity_object.as_deref().unwrap_or("(unknown)")).bold()
        );
    }
    println!();
    Ok(())
}

fn describe(kind: ActivityType) -> &'static str {
    match kind {
        ActivityType::AddProject => "added project",
        ActivityType::AddTask => "added task",
        ActivityType::BeginTask => "began task",
        ActivityType::CompleteTask => "completed task",
        ActivityType::CompleteProject => "completed project",
        ActivityType::EditProject => "edited project",
        ActivityType::EditTask => "edited task",
        ActivityType::BeginProject => "began project",
        ActivityType::DeleteProject => "deleted project",
        ActivityType::DeleteTask => "deleted task",
    }
}
