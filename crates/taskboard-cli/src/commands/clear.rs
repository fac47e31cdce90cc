use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::board::Board;
use crate::cli::ClearCommand;

pub async fn clear_completed(board: &mut Board, command: ClearCommand) -> Result<()> {
    let completed = board.tasks.summary().completed;
    if completed == 0 {
        println!("No completed tasks to clear.");
        return Ok(());
    }

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!("Delete {} completed task(s)?", completed))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Clear cancelled.");
            return Ok(());
        }
    }

    let removed = board.tasks.clear_completed().await?;
    board.tasks_changed().await;

    println!("{} Cleared {} completed task(s)", "✓".green().bold(), removed);
    Ok(())
}
