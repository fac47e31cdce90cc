use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use taskboard_core::models::NewTaskData;

use crate::board::Board;
use crate::cli::AddCommand;
use crate::parser::parse_due_date;
use crate::util::{category_label, resolve_category_id};

pub async fn add_task(board: &mut Board, command: AddCommand) -> Result<()> {
    let due_date = command.due.as_deref().map(parse_due_date).transpose()?;
    let category_id = command
        .category
        .as_deref()
        .map(|c| resolve_category_id(board.categories.categories(), c))
        .transpose()?;

    let new_task_data = NewTaskData {
        title: command.title,
        description: command.description,
        priority: command.priority,
        due_date,
        category_id,
    };

    let task = board.tasks.add(new_task_data).await?;
    board.tasks_changed().await;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    println!("{} Added task: {}", "✓".style(success_style), task.title.bold());
    println!(
        "  {} Task ID: {}",
        "→".style(info_style),
        task.id.to_string().yellow()
    );
    println!("  {} Priority: {}", "→".style(info_style), task.priority);
    if let Some(due) = task.due_date {
        println!("  {} Due: {}", "→".style(info_style), due.format("%Y-%m-%d"));
    }
    if task.category_id.is_some() {
        println!(
            "  {} Category: {}",
            "→".style(info_style),
            category_label(board.categories.categories(), task.category_id)
        );
    }

    Ok(())
}
