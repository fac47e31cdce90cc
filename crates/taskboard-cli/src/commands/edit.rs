use anyhow::{bail, Result};
use owo_colors::OwoColorize;
use taskboard_core::models::UpdateTaskData;

use crate::board::Board;
use crate::cli::EditCommand;
use crate::parser::parse_due_date;
use crate::util::resolve_category_id;

pub async fn edit_task(board: &mut Board, command: EditCommand) -> Result<()> {
    let description = if command.description_clear {
        Some(String::new())
    } else {
        command.description
    };

    let due_date = if command.due_clear {
        Some(None)
    } else {
        command
            .due
            .as_deref()
            .map(parse_due_date)
            .transpose()?
            .map(Some)
    };

    let category_id = if command.category_clear {
        Some(None)
    } else {
        command
            .category
            .as_deref()
            .map(|c| resolve_category_id(board.categories.categories(), c))
            .transpose()?
            .map(Some)
    };

    let update_data = UpdateTaskData {
        title: command.title,
        description,
        priority: command.priority,
        due_date,
        category_id,
        completed: None,
    };

    if update_data.is_empty() {
        bail!("Nothing to change. Pass at least one of --title, --description, --due, --priority or --category.");
    }

    let task = board.tasks.update(command.id, update_data).await?;
    board.tasks_changed().await;

    println!("{} Updated task: '{}'", "✓".green().bold(), task.title);
    Ok(())
}
