use anyhow::{anyhow, Result};
use owo_colors::OwoColorize;
use taskboard_core::error::CoreError;

use crate::board::Board;
use crate::cli::ToggleCommand;

pub async fn toggle_task(board: &mut Board, command: ToggleCommand) -> Result<()> {
    let task = board
        .tasks
        .toggle_complete(command.id)
        .await?
        .ok_or_else(|| anyhow!(CoreError::NotFound(format!("task {}", command.id))))?;
    board.tasks_changed().await;

    if task.completed {
        println!("{} Completed task: '{}'", "✓".green().bold(), task.title);
    } else {
        println!("{} Reopened task: '{}'", "↺".yellow().bold(), task.title);
    }
    Ok(())
}
