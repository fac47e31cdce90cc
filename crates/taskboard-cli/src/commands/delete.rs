use anyhow::{anyhow, Result};
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use taskboard_core::error::CoreError;

use crate::board::Board;
use crate::cli::DeleteCommand;

pub async fn delete_task(board: &mut Board, command: DeleteCommand) -> Result<()> {
    let title = board
        .tasks
        .get(command.id)
        .map(|t| t.title.clone())
        .ok_or_else(|| anyhow!(CoreError::NotFound(format!("task {}", command.id))))?;

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!("Are you sure you want to delete task '{}'?", title))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    board.tasks.remove(command.id).await?;
    board.tasks_changed().await;

    println!("{} Deleted task: '{}'", "✓".green().bold(), title);
    Ok(())
}
