// src/main.rs
use clap::Parser;
use crossterm::style::Stylize;
use ollo::cli::args::Cli;
use ollo::cli::execute_command;
use ollo::config::{load_settings, Settings};
use ollo::exitcode;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::{filter_fn, LevelFilter},
    fmt::{self, format::FmtSpan},
    prelude::*,
};

fn main() {
    let cli = Cli::parse();

    // Load configuration with CLI overrides
    let config_path_ref = cli.config.as_deref();
    let settings = load_settings(config_path_ref).unwrap_or_else(|e| {
        eprintln!("Failed to load settings: {}. Using defaults.", e);
        Settings::default()
    });

    setup_logging(cli.debug, settings.log_level.as_deref(), cli.no_color);

    if let Err(e) = execute_command(cli, &settings) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(exitcode::USAGE);
    }
}

fn setup_logging(verbosity: u8, config_level: Option<&str>, no_color: bool) {
    let filter = match verbosity {
        // without -d the config file level applies, default WARN
        0 => config_level
            .and_then(|l| l.parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::WARN),
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // Create a noisy module filter
    let noisy_modules = ["reqwest", "mio", "want", "hyper_util", "rustls"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Formatted output to stderr keeps stdout passable to downstream processes
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(!no_color)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => info!("Debug mode: info"),
        LevelFilter::DEBUG => debug!("Debug mode: debug"),
        LevelFilter::TRACE => debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_cli_command_when_verify_then_debug_asserts_pass() {
        use clap::CommandFactory;
        Cli::command().debug_assert()
    }
}
