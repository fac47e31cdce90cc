use clap::{Parser, Subcommand};
use taskboard_core::models::TaskPriority;
use taskboard_core::state::TaskView;

/// Taskboard: track tasks with categories, priorities and due dates
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// List tasks
    List(ListCommand),
    /// Show a single task in detail
    Show(ShowCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Flip a task between active and completed
    Toggle(ToggleCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Delete every completed task
    Clear(ClearCommand),
    /// Show completion statistics
    Stats,
    /// Manage categories
    Category(CategoryCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// The description of the task
    #[clap(short, long)]
    pub description: Option<String>,
    /// The due date of the task (e.g. "tomorrow", "2025-03-01")
    #[clap(long)]
    pub due: Option<String>,
    /// The priority of the task (low, medium, high)
    #[clap(short, long)]
    pub priority: Option<TaskPriority>,
    /// Category name or id
    #[clap(short, long)]
    pub category: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Which tasks to show: all, active, completed or a category id
    #[clap(short, long)]
    pub view: Option<TaskView>,
    /// Only show tasks in this category (name or id)
    #[clap(short, long, conflicts_with = "view")]
    pub category: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    /// The ID of the task to show
    pub id: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: i64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, conflicts_with = "description")]
    pub description_clear: bool,

    #[arg(long)]
    pub due: Option<String>,
    #[arg(long, conflicts_with = "due")]
    pub due_clear: bool,

    #[arg(long)]
    pub priority: Option<TaskPriority>,

    /// Category name or id
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, conflicts_with = "category")]
    pub category_clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ToggleCommand {
    /// The ID of the task to toggle
    pub id: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: i64,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ClearCommand {
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CategoryCommand {
    #[command(subcommand)]
    pub command: CategorySubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CategorySubcommand {
    /// Add a new category
    Add(AddCategoryCommand),
    /// List categories with their task counts
    List,
    /// Rename or recolor a category
    Edit(EditCategoryCommand),
    /// Delete a category
    Delete(DeleteCategoryCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCategoryCommand {
    /// The name of the category
    pub name: String,
    /// Display color, e.g. "#10B981"
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCategoryCommand {
    /// Category name or id
    pub category: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCategoryCommand {
    /// Category name or id
    pub category: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}
