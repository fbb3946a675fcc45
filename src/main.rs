use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use taskboard::models::Page;

mod cmd;
mod ui;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(version, about = "Task and project management client")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// API server base URL. Overrides TASKBOARD_SERVER_URL and taskboard.toml
    #[arg(long, global = true)]
    pub server_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and persist the session
    Login {
        /// Email address; prompted for when omitted
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Register a new account
    Register,
    /// Drop the persisted session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Manage projects
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Manage tasks
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage teams and membership
    Team {
        #[command(subcommand)]
        command: TeamCommands,
    },
    /// File and list bug reports
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Show the activity feed
    Activity {
        /// Only today's activity
        #[arg(long, conflicts_with = "week")]
        today: bool,
        /// Only the past week's activity
        #[arg(long)]
        week: bool,
    },
    /// Serve the built front-end bundle
    Serve {
        #[arg(short, long, default_value = "8081")]
        port: u16,
        /// Directory holding the bundle
        #[arg(long, default_value = "dist")]
        dir: PathBuf,
        /// Disable the index.html fallback for client-side routes
        #[arg(long)]
        no_spa: bool,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List projects, optionally filtered
    List {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        favorite: bool,
    },
    Show {
        id: String,
    },
    Create {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Hex color, e.g. "#083D77"
        #[arg(long)]
        color: Option<String>,
        /// Deadline, e.g. "26 Aug 2026"
        #[arg(long)]
        deadline: Option<String>,
        #[arg(long)]
        favorite: bool,
    },
    Remove {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Tasks of one project
    List { project_id: String },
    /// Tasks due today
    Today,
    Create {
        project_id: String,
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Deadline, e.g. "26 Aug 2026"
        #[arg(long)]
        deadline: Option<String>,
    },
    /// Mark a task closed
    Close {
        /// Project the task belongs to
        project_id: String,
        id: String,
    },
    Remove {
        /// Project the task belongs to
        project_id: String,
        id: String,
    },
}

#[derive(Subcommand)]
pub enum TeamCommands {
    List,
    Show {
        id: String,
    },
    Create {
        #[arg(short, long)]
        title: String,
    },
    Remove {
        id: String,
    },
    /// Invite a user by email
    AddUser {
        team_id: String,
        email: String,
        /// owner, read-write-delete, read-write, or read
        #[arg(long, default_value = "read")]
        role: String,
    },
    RemoveUser {
        team_id: String,
        user_id: String,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// List reports, optionally for one page
    List {
        /// main, auth, projects, or project
        #[arg(long)]
        page: Option<String>,
    },
    Create {
        #[arg(short, long)]
        description: String,
        /// Page the bug was observed on
        #[arg(long)]
        page: Option<String>,
    },
    Remove {
        id: String,
    },
}

fn parse_page(value: &str) -> Result<Page> {
    match value.to_lowercase().as_str() {
        "main" => Ok(Page::Main),
        "auth" => Ok(Page::Auth),
        "projects" => Ok(Page::Projects),
        "project" => Ok(Page::Project),
        _ => anyhow::bail!(
            "Invalid page '{}'. Valid values: main, auth, projects, project",
            value
        ),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Login { email } => cmd::cmd_login(&cli, email.as_deref()).await?,
        Commands::Register => cmd::cmd_register(&cli).await?,
        Commands::Logout => cmd::cmd_logout(&cli).await?,
        Commands::Whoami => cmd::cmd_whoami(&cli).await?,
        Commands::Project { command } => cmd::cmd_project(&cli, command).await?,
        Commands::Task { command } => cmd::cmd_task(&cli, command).await?,
        Commands::Team { command } => cmd::cmd_team(&cli, command).await?,
        Commands::Report { command } => cmd::cmd_report(&cli, command).await?,
        Commands::Activity { today, week } => cmd::cmd_activity(&cli, *today, *week).await?,
        Commands::Serve { port, dir, no_spa } => {
            cmd::cmd_serve(*port, dir.clone(), !*no_spa).await?
        }
    }

    Ok(())
}
