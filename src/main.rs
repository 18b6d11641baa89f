use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::env;
use tracing_subscriber::EnvFilter;

use workboard::commands;
use workboard::config;
use workboard::models::{ProjectStatus, Role, TaskStatus};
use workboard::store::Store;

#[derive(Parser)]
#[command(name = "workboard")]
#[command(about = "A lean project and task tracker backed by a shared remote JSON store")]
#[command(version)]
struct Cli {
    /// Remote store base URL (overrides the discovered config)
    #[arg(long, env = "WORKBOARD_STORE_URL", global = true)]
    store_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize workboard in the current directory
    Init,

    /// Team directory
    Team {
        #[command(subcommand)]
        action: TeamCommands,
    },

    /// Project catalog
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },

    /// Task board
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },

    /// Comment threads
    Comment {
        #[command(subcommand)]
        action: CommentCommands,
    },
}

#[derive(Subcommand)]
enum TeamCommands {
    /// List team members
    List,

    /// Add a team member
    Add {
        /// Member name
        name: String,
        /// Member email
        email: String,
        /// Role (developer, designer, manager, qa, dev-ops)
        #[arg(short, long, value_enum, default_value = "developer")]
        role: Role,
    },

    /// Update a team member
    Update {
        /// Member id
        id: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New email
        #[arg(short, long)]
        email: Option<String>,
        /// New role
        #[arg(short, long, value_enum)]
        role: Option<Role>,
    },

    /// Remove a team member
    Remove {
        /// Member id
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// List projects
    List {
        /// Filter by status (active, completed, on-hold)
        #[arg(short, long, value_enum)]
        status: Option<ProjectStatus>,
        /// Filter by owner (member id)
        #[arg(short, long)]
        owner: Option<String>,
    },

    /// Create a project
    Add {
        /// Project title
        title: String,
        /// Owner (member id)
        #[arg(short, long)]
        owner: String,
        /// Status (active, completed, on-hold)
        #[arg(short, long, value_enum, default_value = "active")]
        status: ProjectStatus,
        /// Project description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Update a project
    Update {
        /// Project id
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New owner (member id)
        #[arg(short, long)]
        owner: Option<String>,
        /// New status
        #[arg(short, long, value_enum)]
        status: Option<ProjectStatus>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a project
    Remove {
        /// Project id
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Show the kanban board for a project
    Board {
        /// Project id
        project_id: String,
    },

    /// Create a task in a project
    Add {
        /// Project id
        project_id: String,
        /// Task title
        title: String,
        /// Assignee (member id)
        #[arg(short, long)]
        assignee: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Status (todo, in-progress, done)
        #[arg(short, long, value_enum, default_value = "todo")]
        status: TaskStatus,
        /// Task description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Update a task
    Update {
        /// Task id
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New assignee (member id)
        #[arg(short, long)]
        assignee: Option<String>,
        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// New status
        #[arg(short, long, value_enum)]
        status: Option<TaskStatus>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Move a task to another lane
    Move {
        /// Task id
        id: String,
        /// Target status (todo, in-progress, done)
        #[arg(value_enum)]
        status: TaskStatus,
    },

    /// Show task details and its comment thread
    Show {
        /// Task id
        id: String,
    },

    /// Delete a task
    Remove {
        /// Task id
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum CommentCommands {
    /// List comments for a task, newest first
    List {
        /// Task id
        task_id: String,
    },

    /// Add a comment to a task
    Add {
        /// Task id
        task_id: String,
        /// Author (member id)
        author: String,
        /// Comment text
        text: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Cli { store_url, command } = Cli::parse();

    if let Commands::Init = command {
        let url = store_url
            .as_deref()
            .context("--store-url (or WORKBOARD_STORE_URL) is required for init")?;
        let cwd = env::current_dir()?;
        return commands::init::run(&cwd, url);
    }

    let url = config::resolve_store_url(store_url.as_deref())?;
    let store = Store::connect(&url)?;

    match command {
        Commands::Init => unreachable!("handled above"),

        Commands::Team { action } => match action {
            TeamCommands::List => commands::team::list(&store),
            TeamCommands::Add { name, email, role } => {
                commands::team::add(&store, &name, &email, role)
            }
            TeamCommands::Update {
                id,
                name,
                email,
                role,
            } => commands::team::update(&store, &id, name.as_deref(), email.as_deref(), role),
            TeamCommands::Remove { id, force } => commands::team::remove(&store, &id, force),
        },

        Commands::Project { action } => match action {
            ProjectCommands::List { status, owner } => {
                commands::project::list(&store, status, owner.as_deref())
            }
            ProjectCommands::Add {
                title,
                owner,
                status,
                description,
            } => commands::project::add(&store, &title, &owner, status, description.as_deref()),
            ProjectCommands::Update {
                id,
                title,
                owner,
                status,
                description,
            } => commands::project::update(
                &store,
                &id,
                title.as_deref(),
                owner.as_deref(),
                status,
                description.as_deref(),
            ),
            ProjectCommands::Remove { id, force } => commands::project::remove(&store, &id, force),
        },

        Commands::Task { action } => match action {
            TaskCommands::Board { project_id } => commands::task::board(&store, &project_id),
            TaskCommands::Add {
                project_id,
                title,
                assignee,
                due,
                status,
                description,
            } => commands::task::add(
                &store,
                &project_id,
                &title,
                &assignee,
                due,
                status,
                description.as_deref(),
            ),
            TaskCommands::Update {
                id,
                title,
                assignee,
                due,
                status,
                description,
            } => commands::task::update(
                &store,
                &id,
                title.as_deref(),
                assignee.as_deref(),
                due,
                status,
                description.as_deref(),
            ),
            TaskCommands::Move { id, status } => commands::task::move_status(&store, &id, status),
            TaskCommands::Show { id } => commands::task::show(&store, &id),
            TaskCommands::Remove { id, force } => commands::task::remove(&store, &id, force),
        },

        Commands::Comment { action } => match action {
            CommentCommands::List { task_id } => commands::comment::list(&store, &task_id),
            CommentCommands::Add {
                task_id,
                author,
                text,
            } => commands::comment::add(&store, &task_id, &author, &text),
        },
    }
}
