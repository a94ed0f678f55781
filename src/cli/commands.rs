use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "edash", about = concat!("enterprise dashboard v", env!("CARGO_PKG_VERSION"), " - role-based tasks in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(short = 'D', long = "data-dir", global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the signed-in user and task summary
    Status,
    /// Sign in
    Login(LoginArgs),
    /// Sign out and clear the saved session
    Logout,
    /// List tasks visible to the signed-in user
    Tasks(TasksArgs),
    /// Create a task assigned to yourself
    Add(AddArgs),
    /// Move a task to another status
    Move(MoveArgs),
    /// Delete a task
    Delete(DeleteArgs),
    /// Show what the signed-in user may do
    Perms,
    /// Export users and tasks as JSON
    Export(ExportArgs),
    /// Discard saved state and start from the demo data
    Reset,
    /// Search the company list by symbol or name
    Companies(CompaniesArgs),
    /// View or edit config.toml
    Config(ConfigCmd),
}

#[derive(Args)]
pub struct LoginArgs {
    /// Username (e.g. admin@example.com)
    pub username: String,
    /// Password
    pub password: String,
}

#[derive(Args)]
pub struct TasksArgs {
    /// Filter by status (backlog, todo, in-progress, review, done)
    #[arg(long)]
    pub status: Option<String>,
    /// Filter by tag (general, admin, sales)
    #[arg(long)]
    pub tag: Option<String>,
    /// Filter by priority (low, medium, high)
    #[arg(long)]
    pub priority: Option<String>,
    /// Case-insensitive text search over title, description and id
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Description
    #[arg(long = "desc")]
    pub description: Option<String>,
    /// Tag (general, admin, sales)
    #[arg(long, default_value = "general")]
    pub tag: String,
    /// Priority (low, medium, high)
    #[arg(long, default_value = "medium")]
    pub priority: String,
    /// Initial status
    #[arg(long, default_value = "todo")]
    pub status: String,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct MoveArgs {
    /// Task ID
    pub id: String,
    /// Target status (backlog, todo, in-progress, review, done)
    pub status: String,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Directory to write the export into (default: [storage] export_dir, else the data directory)
    #[arg(short = 'o', long = "output")]
    pub output: Option<String>,
}

#[derive(Args)]
pub struct CompaniesArgs {
    /// Search text (at least 2 characters)
    pub query: String,
}

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a commented config.toml into the data directory
    Init(ConfigInitArgs),
    /// Set a value, e.g. `ui.toast_seconds 6`
    Set(ConfigSetArgs),
}

#[derive(Args)]
pub struct ConfigInitArgs {
    /// Overwrite an existing config.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ConfigSetArgs {
    /// Dotted key: <section>.<key>
    pub key: String,
    /// New value
    pub value: String,
}
