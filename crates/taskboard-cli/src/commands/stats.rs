use anyhow::Result;

use crate::board::Board;
use crate::views::table::display_summary;

pub fn show_stats(board: &Board) -> Result<()> {
    display_summary(&board.tasks.summary(), board.categories.categories());
    Ok(())
}
