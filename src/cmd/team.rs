//! Team and membership commands.

use anyhow::{Context, Result};
use console::style;

use taskboard::models::TeamUserRole;

use super::{bootstrap, require_login};
use crate::{Cli, TeamCommands};

fn parse_role(value: &str) -> Result<TeamUserRole> {
    match value.to_lowercase().as_str() {
        "owner" => Ok(TeamUserRole::Owner),
        "read-write-delete" => Ok(TeamUserRole::ReadWriteDelete),
        "read-write" => Ok(TeamUserRole::ReadWrite),
        "read" => Ok(TeamUserRole::Read),
        _ => anyhow::bail!(
            "Invalid role '{}'. Valid values: owner, read-write-delete, read-write, read",
            value
        ),
    }
}

pub async fn cmd_team(cli: &Cli, command: &TeamCommands) -> Result<()> {
    let ctx = bootstrap(cli)?;
    require_login(&ctx.stores).await?;
    let teams = &ctx.stores.teams;

    match command {
        TeamCommands::List => {
            teams.fetch_teams().await;
            let listed = teams.state().teams;
            if listed.is_empty() {
                println!("No teams found.");
                return Ok(());
            }
            println!();
            println!("{:<26} {:<25} Members", "Id", "Title");
            for team in &listed {
                println!(
                    "{:<26} {:<25} {}",
                    style(team.id.as_deref().unwrap_or("-")).dim(),
                    team.title.as_deref().unwrap_or("(untitled)"),
                    team.users.len()
                );
            }
            println!();
        }
        TeamCommands::Show { id } => {
            teams.fetch_team(id).await;
            let state = teams.state();
            let Some(team) = state.team else {
                anyhow::bail!("Team {id} not found");
            };
            println!();
            println!("{}", style(team.title.as_deref().unwrap_or("(untitled)")).bold());
            println!("Your role: {}", state.current_user_role.label());
            println!();
            println!("Members:");
            for user in &team.users {
                println!("  {} <{}>", user.name, user.email);
            }
            if !team.projects.is_empty() {
                println!();
                println!("Projects:");
                for project in &team.projects {
                    println!("  {}", project.title.as_deref().unwrap_or("(untitled)"));
                }
            }
            println!();
        }
        TeamCommands::Create { title } => {
            teams.begin_create();
            teams.modify_draft(|t| t.title = Some(title.clone()));
            teams.save_team().await;
            println!("Created team {}", style(title).bold());
        }
        TeamCommands::Remove { id } => {
            teams.remove_team(id).await;
            println!("Removed team {id}");
        }
        TeamCommands::AddUser {
            team_id,
            email,
            role,
        } => {
            let role = parse_role(role)?;

            teams.fetch_team(team_id).await;
            let team = teams
                .state()
                .team
                .with_context(|| format!("Team {team_id} not found"))?;
            teams.begin_edit(team);

            teams.search_users_by_email(email).await;
            let user = teams
                .state()
                .autocomplete_users
                .into_iter()
                .find(|u| u.email.eq_ignore_ascii_case(email))
                .with_context(|| format!("No user found for {email}"))?;

            teams.add_user(&user.id, role).await;
            println!("Added {} to team as {}", user.email, role.label());
        }
        TeamCommands::RemoveUser { team_id, user_id } => {
            teams.fetch_team(team_id).await;
            let team = teams
                .state()
                .team
                .with_context(|| format!("Team {team_id} not found"))?;
            teams.begin_edit(team);
            teams.remove_user(user_id).await;
            println!("Removed user {user_id} from team");
        }
    }

    Ok(())
}
