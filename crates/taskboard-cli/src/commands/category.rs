use anyhow::{bail, Result};
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use taskboard_core::models::{NewCategoryData, UpdateCategoryData};

use crate::board::Board;
use crate::cli::{
    AddCategoryCommand, CategoryCommand, CategorySubcommand, DeleteCategoryCommand,
    EditCategoryCommand,
};
use crate::util::resolve_category_id;
use crate::views::table::display_categories;

pub async fn category_command(board: &mut Board, command: CategoryCommand) -> Result<()> {
    match command.command {
        CategorySubcommand::Add(cmd) => add_category(board, cmd).await,
        CategorySubcommand::List => {
            display_categories(board.categories.categories());
            Ok(())
        }
        CategorySubcommand::Edit(cmd) => edit_category(board, cmd).await,
        CategorySubcommand::Delete(cmd) => delete_category(board, cmd).await,
    }
}

async fn add_category(board: &mut Board, command: AddCategoryCommand) -> Result<()> {
    let category = board
        .categories
        .add(NewCategoryData {
            name: command.name,
            color: command.color,
        })
        .await?;

    println!(
        "{} Added category: {} ({})",
        "✓".green().bold(),
        category.name.bold(),
        category.id.to_string().yellow()
    );
    Ok(())
}

async fn edit_category(board: &mut Board, command: EditCategoryCommand) -> Result<()> {
    if command.name.is_none() && command.color.is_none() {
        bail!("Nothing to change. Pass --name or --color.");
    }
    let id = resolve_category_id(board.categories.categories(), &command.category)?;

    let category = board
        .categories
        .update(
            id,
            UpdateCategoryData {
                name: command.name,
                color: command.color,
            },
        )
        .await?;

    println!("{} Updated category: '{}'", "✓".green().bold(), category.name);
    Ok(())
}

async fn delete_category(board: &mut Board, command: DeleteCategoryCommand) -> Result<()> {
    let id = resolve_category_id(board.categories.categories(), &command.category)?;
    let (name, task_count) = board
        .categories
        .get(id)
        .map(|c| (c.name.clone(), c.task_count))
        .unwrap_or_default();

    if !command.force {
        let prompt = if task_count > 0 {
            format!(
                "Category '{}' has {} task(s). Delete it anyway?",
                name, task_count
            )
        } else {
            format!("Are you sure you want to delete category '{}'?", name)
        };
        let confirmation = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    board.categories.remove(id).await?;
    // Detached tasks lost their category.
    board.tasks.refetch().await;

    println!("{} Deleted category: '{}'", "✓".green().bold(), name);
    Ok(())
}
