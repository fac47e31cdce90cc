use chrono::{Local, NaiveDate};
use chrono_humanize::Humanize;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use owo_colors::OwoColorize;
use taskboard_core::models::{Category, Task, TaskPriority};
use taskboard_core::state::TaskSummary;

use crate::util::category_label;

pub fn display_tasks(tasks: &[&Task], categories: &[Category]) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let today = Local::now().date_naive();
    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Priority", "Due", "Category", "Created"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.id));

        let mut title_cell = Cell::new(&task.title);
        if task.completed {
            title_cell = title_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey);
        } else if task.priority == TaskPriority::High {
            title_cell = title_cell.add_attribute(Attribute::Bold);
        }
        row.add_cell(title_cell);

        row.add_cell(priority_cell(task.priority));
        row.add_cell(due_cell(task, today));
        row.add_cell(Cell::new(category_label(categories, task.category_id)));
        row.add_cell(Cell::new(task.created_at.humanize()));
        table.add_row(row);
    }

    println!("{table}");
}

fn priority_cell(priority: TaskPriority) -> Cell {
    let cell = Cell::new(priority);
    match priority {
        TaskPriority::High => cell.fg(Color::Red),
        TaskPriority::Medium => cell.fg(Color::Yellow),
        TaskPriority::Low => cell.fg(Color::Green),
    }
}

fn due_cell(task: &Task, today: NaiveDate) -> Cell {
    let Some(due) = task.due_date else {
        return Cell::new("None");
    };

    let text = due_label(due, today);
    if task.is_overdue(today) {
        Cell::new(text).fg(Color::Red)
    } else if !task.completed && is_due_soon(due, today) {
        Cell::new(text).fg(Color::Yellow)
    } else {
        Cell::new(text)
    }
}

/// Due today or tomorrow.
fn is_due_soon(due: NaiveDate, today: NaiveDate) -> bool {
    matches!((due - today).num_days(), 0 | 1)
}

fn due_label(due: NaiveDate, today: NaiveDate) -> String {
    match (due - today).num_days() {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        _ => due.format("%Y-%m-%d").to_string(),
    }
}

pub fn display_task(task: &Task, categories: &[Category]) {
    let today = Local::now().date_naive();
    let status = if task.completed {
        "completed".green().to_string()
    } else if task.is_overdue(today) {
        "overdue".red().to_string()
    } else {
        "active".yellow().to_string()
    };

    println!("{} {}", format!("#{}", task.id).bright_black(), task.title.bold());
    println!("  Status:      {}", status);
    println!("  Priority:    {}", task.priority);
    println!(
        "  Due:         {}",
        task.due_date
            .map(|d| due_label(d, today))
            .unwrap_or_else(|| "None".to_string())
    );
    println!(
        "  Category:    {}",
        category_label(categories, task.category_id)
    );
    println!(
        "  Created:     {} ({})",
        task.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        task.created_at.humanize()
    );
    if let Some(completed_at) = task.completed_at {
        println!(
            "  Completed:   {} ({})",
            completed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            completed_at.humanize()
        );
    }
    if !task.description.is_empty() {
        println!();
        println!("  {}", task.description);
    }
}

pub fn display_categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Color", "Tasks"]);

    for category in categories {
        let mut row = Row::new();
        row.add_cell(Cell::new(category.id));
        let name_cell = match hex_color(&category.color) {
            Some(color) => Cell::new(&category.name).fg(color),
            None => Cell::new(&category.name),
        };
        row.add_cell(name_cell);
        row.add_cell(Cell::new(&category.color));
        row.add_cell(Cell::new(category.task_count));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_summary(summary: &TaskSummary, categories: &[Category]) {
    println!(
        "{} total, {} active, {} completed ({}% done)",
        summary.total.bold(),
        summary.active.yellow(),
        summary.completed.green(),
        summary.percent_complete()
    );

    if !categories.is_empty() {
        println!();
        for category in categories {
            println!("  {:<20} {}", category.name, category.task_count);
        }
    }
}

/// Parses "#RRGGBB" into a terminal color.
fn hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}
