// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Talk to a local Ollama server: embeddings and streamed generation
pub struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Disable ANSI colors in output
    #[arg(long)]
    pub no_color: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long = "generate-config")]
    pub generate_config: bool,

    #[arg(long = "dummy", help = "use the dummy embedder (no network I/O)")]
    pub dummy: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Embed texts and print dimensions plus pairwise similarity
    Embed {
        /// Texts to embed; reads stdin lines when empty
        texts: Vec<String>,

        #[arg(long = "title", help = "title prepended to every document")]
        title: Option<String>,
    },
    /// Ask the model a single prompt and print the assembled answer
    Ask {
        /// The prompt text
        prompt: String,
    },
    /// Interactive chat loop, 'exit' or ctrl+d to quit
    Chat,
}
