use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tb",
    about = concat!("taskboard v", env!("CARGO_PKG_VERSION"), " - an in-memory kanban board"),
    long_about = "Run a single command against a fresh board, or start without a command for an interactive session.",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./taskboard.toml if present)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Start without the sample tasks
    #[arg(long, global = true)]
    pub empty: bool,
}

/// One line typed at the shell prompt
#[derive(Parser)]
#[command(name = "tb", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every column with its tasks
    Board(BoardArgs),
    /// List tasks, optionally filtered
    List(ListArgs),
    /// Show task details
    Show(IdArg),
    /// Search titles and descriptions (case-insensitive)
    Search(SearchArgs),
    /// List columns
    Columns,
    /// Show board statistics
    Stats,
    /// List everyone assigned to a task or subtask
    Members,
    /// List every attached document
    Docs,
    /// Create a task
    Add(AddArgs),
    /// Edit task fields
    Edit(EditArgs),
    /// Delete a task
    Rm(IdArg),
    /// Move a task to another column
    Mv(MvArgs),
    /// Column management
    Column(ColumnCmd),
    /// Comment on a task
    Comment(CommentArgs),
    /// Add or remove labels
    Label(LabelCmd),
    /// Assign someone to a task by name
    Assign(AssignArgs),
    /// Remove an assignee (by id or name)
    Unassign(AssignArgs),
    /// Attach a document to a task
    Attach(AttachArgs),
    /// Remove a document from a task
    Detach(DetachArgs),
    /// Subtask management
    Sub(SubCmd),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct IdArg {
    /// Task ID
    pub id: String,
}

#[derive(Args)]
pub struct BoardArgs {
    /// Only show this column (id or title)
    #[arg(long)]
    pub column: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Filter by column (id or title)
    #[arg(long)]
    pub column: Option<String>,
    /// Filter by priority (low, medium, high)
    #[arg(long)]
    pub priority: Option<String>,
    /// Filter by deadline (overdue, today, week, future)
    #[arg(long)]
    pub deadline: Option<String>,
    /// Only tasks whose title or description contains this text
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Text to look for
    pub term: String,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Deadline: today, tomorrow, +Nd, YYYY-MM-DD or RFC 3339
    #[arg(long)]
    pub due: String,
    /// Column (id or title; default: the first column)
    #[arg(long)]
    pub column: Option<String>,
    /// Priority (low, medium, high)
    #[arg(long, default_value = "medium")]
    pub priority: String,
    /// Description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Assignee name (repeatable)
    #[arg(long)]
    pub assignee: Vec<String>,
    /// Label (repeatable)
    #[arg(long)]
    pub label: Vec<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID
    pub id: String,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New description
    #[arg(short, long)]
    pub description: Option<String>,
    /// New priority
    #[arg(long)]
    pub priority: Option<String>,
    /// New deadline
    #[arg(long)]
    pub due: Option<String>,
    /// New column (id or title)
    #[arg(long)]
    pub column: Option<String>,
}

#[derive(Args)]
pub struct MvArgs {
    /// Task ID
    pub id: String,
    /// Target column (id or title)
    pub column: String,
}

#[derive(Args)]
pub struct CommentArgs {
    /// Task ID
    pub id: String,
    /// Comment text
    pub text: String,
}

#[derive(Args)]
pub struct AssignArgs {
    /// Task ID
    pub id: String,
    /// Member name (or id, for unassign)
    pub name: String,
}

#[derive(Args)]
pub struct AttachArgs {
    /// Task ID
    pub id: String,
    /// File name
    pub name: String,
    /// MIME type (default: guessed from the extension)
    #[arg(long = "type")]
    pub mime_type: Option<String>,
    /// Where the content lives (default: file://<name>)
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Args)]
pub struct DetachArgs {
    /// Task ID
    pub id: String,
    /// Document ID
    pub doc: String,
}

// ---------------------------------------------------------------------------
// Column management
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ColumnCmd {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// Add a column at the end
    Add {
        /// Column title
        title: String,
        /// Icon (star, circle, square, triangle)
        #[arg(long)]
        icon: Option<String>,
    },
    /// Delete a column; its tasks move to the first remaining column
    Rm {
        /// Column id or title
        column: String,
    },
    /// Change a column's title and icon
    Rename {
        /// Column id or title
        column: String,
        /// New title
        title: String,
        /// New icon (default: keep the current one)
        #[arg(long)]
        icon: Option<String>,
        /// Remove the icon
        #[arg(long, conflicts_with = "icon")]
        no_icon: bool,
    },
}

// ---------------------------------------------------------------------------
// Labels and subtasks
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct LabelCmd {
    #[command(subcommand)]
    pub action: LabelAction,
}

#[derive(Subcommand)]
pub enum LabelAction {
    /// Add a label to a task
    Add {
        /// Task ID
        id: String,
        /// Label text
        label: String,
    },
    /// Remove a label from a task
    Rm {
        /// Task ID
        id: String,
        /// Label text
        label: String,
    },
}

#[derive(Args)]
pub struct SubCmd {
    #[command(subcommand)]
    pub action: SubAction,
}

#[derive(Subcommand)]
pub enum SubAction {
    /// Add a subtask
    Add {
        /// Parent task ID
        id: String,
        /// Subtask title
        title: String,
        /// Assignee name
        #[arg(long)]
        assignee: Option<String>,
    },
    /// Flip a subtask between open and done
    Toggle {
        /// Parent task ID
        id: String,
        /// Subtask ID
        sub: String,
    },
    /// Delete a subtask
    Rm {
        /// Parent task ID
        id: String,
        /// Subtask ID
        sub: String,
    },
    /// Assign a subtask to someone
    Assign {
        /// Parent task ID
        id: String,
        /// Subtask ID
        sub: String,
        /// Member name
        name: String,
    },
}
