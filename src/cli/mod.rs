// src/cli/mod.rs
use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::config::Settings;

pub mod args;
pub mod commands;
pub mod error;

pub fn execute_command(cli: Cli, settings: &Settings) -> CliResult<()> {
    if cli.generate_config {
        println!("{}", crate::config::generate_default_config());
        return Ok(());
    }
    match cli.command {
        Some(Commands::Embed { texts, title }) => {
            commands::embed(settings, cli.dummy, texts, title)
        }
        Some(Commands::Ask { prompt }) => commands::ask(settings, prompt),
        Some(Commands::Chat) => commands::chat(settings),
        None => Ok(()),
    }
}
