use anyhow::Result;
use taskboard_core::state::TaskView;

use crate::board::Board;
use crate::cli::ListCommand;
use crate::config::Config;
use crate::util::resolve_category_id;
use crate::views::table::display_tasks;

pub fn list_tasks(board: &Board, command: ListCommand, config: &Config) -> Result<()> {
    let view = match (command.view, command.category) {
        (Some(view), _) => view,
        (None, Some(category)) => {
            TaskView::Category(resolve_category_id(board.categories.categories(), &category)?)
        }
        (None, None) => config.default_view,
    };

    let tasks = board.tasks.filtered(view);
    display_tasks(&tasks, board.categories.categories());
    Ok(())
}
