use anyhow::{anyhow, Result};
use taskboard_core::error::CoreError;

use crate::board::Board;
use crate::cli::ShowCommand;
use crate::views::table::display_task;

pub fn show_task(board: &Board, command: ShowCommand) -> Result<()> {
    let task = board
        .tasks
        .get(command.id)
        .ok_or_else(|| anyhow!(CoreError::NotFound(format!("task {}", command.id))))?;

    display_task(task, board.categories.categories());
    Ok(())
}
