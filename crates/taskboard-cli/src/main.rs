use clap::Parser;
use owo_colors::{OwoColorize, Style};
use taskboard_core::error::CoreError;
use tracing_subscriber::EnvFilter;

mod board;
mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} Invalid configuration: {}", "Error:".red().bold(), e);
            std::process::exit(2);
        }
    };
    init_tracing(&config.log_level);
    tracing::debug!(?config, "configuration loaded");

    let loaded = match board::Board::open(&config).await {
        Ok(board) => board.ensure_loaded().map(|_| board),
        Err(e) => Err(e),
    };
    let mut board = match loaded {
        Ok(board) => board,
        Err(e) => {
            handle_error(e);
            eprintln!(
                "{} Check that '{}' is reachable and run the command again.",
                "Hint:".yellow().bold(),
                config.database_path
            );
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        cli::Commands::Add(command) => commands::add::add_task(&mut board, command).await,
        cli::Commands::List(command) => commands::list::list_tasks(&board, command, &config),
        cli::Commands::Show(command) => commands::show::show_task(&board, command),
        cli::Commands::Edit(command) => commands::edit::edit_task(&mut board, command).await,
        cli::Commands::Toggle(command) => {
            commands::toggle::toggle_task(&mut board, command).await
        }
        cli::Commands::Delete(command) => {
            commands::delete::delete_task(&mut board, command).await
        }
        cli::Commands::Clear(command) => {
            commands::clear::clear_completed(&mut board, command).await
        }
        cli::Commands::Stats => commands::stats::show_stats(&board),
        cli::Commands::Category(command) => {
            commands::category::category_command(&mut board, command).await
        }
    };

    board.close().await;

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so table output stays clean. `RUST_LOG` wins over the
/// configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} Not found: {}", "Error:".style(error_style), s);
            }
            CoreError::Validation(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::CategoryInUse { name, count } => {
                eprintln!(
                    "{} Category '{}' is still used by {} task(s)",
                    "Error:".style(error_style),
                    name.yellow(),
                    count
                );
                eprintln!(
                    "Move or delete those tasks first, or set category_delete = \"detach\" in taskboard.toml."
                );
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), core_error),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
