// src/cli/commands.rs
use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;
use tracing::{debug, instrument};

use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::embedding::{EmbedDoc, Embedder};
use crate::infrastructure::embeddings::{assemble_response, DummyEmbedding, OllamaEmbedding};

fn build_embedder(settings: &Settings, dummy: bool) -> CliResult<Box<dyn Embedder>> {
    if dummy {
        debug!("Using DummyEmbedding (no network I/O)");
        return Ok(Box::new(DummyEmbedding));
    }
    Ok(Box::new(OllamaEmbedding::new(
        settings.server.as_deref(),
        &settings.embed_model,
    )?))
}

/// Embed the given texts (or stdin lines) and print per-document dimensions
/// plus, for two or more documents, the pairwise dot-product matrix.
#[instrument(skip_all)]
pub fn embed(
    settings: &Settings,
    dummy: bool,
    texts: Vec<String>,
    title: Option<String>,
) -> CliResult<()> {
    let texts = if texts.is_empty() {
        read_stdin_lines()?
    } else {
        texts
    };
    if texts.is_empty() {
        return Err(CliError::InvalidInput("no texts to embed".to_string()));
    }

    let title = title.unwrap_or_default();
    let docs: Vec<EmbedDoc> = texts
        .iter()
        .map(|t| EmbedDoc::new(title.clone(), t.clone()))
        .collect();

    let embedder = build_embedder(settings, dummy)?;
    let vecs = embedder.embed_docs(&docs)?;

    for (i, (doc, vec)) in docs.iter().zip(&vecs).enumerate() {
        println!("doc {}: {} dims  {:?}", i, vec.len(), doc.text);
    }

    if vecs.len() >= 2 {
        println!("\npairwise dot products:");
        for a in &vecs {
            let row: Vec<String> = vecs.iter().map(|b| format!("{:9.4}", a.dot(b))).collect();
            println!("  {}", row.join(" "));
        }
    }
    Ok(())
}

/// One-shot generation: send the prompt, reassemble the stream, print the
/// answer.
#[instrument(skip_all)]
pub fn ask(settings: &Settings, prompt: String) -> CliResult<()> {
    let client = OllamaEmbedding::new(settings.server.as_deref(), &settings.gen_model)?;
    let answer = ask_once(&client, &prompt)?;
    println!("{}", format!("Answer: {}", answer).green());
    Ok(())
}

/// Interactive chat loop over stdin; 'exit' or EOF quits. A failed round
/// is reported and the loop continues.
#[instrument(skip_all)]
pub fn chat(settings: &Settings) -> CliResult<()> {
    let client = OllamaEmbedding::new(settings.server.as_deref(), &settings.gen_model)?;
    println!("Chat with {}, ctrl+d or 'exit' to quit", client.model());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    print!("> ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input == "exit" {
            break;
        }
        if !input.is_empty() {
            match ask_once(&client, input) {
                Ok(answer) => println!("{}", format!("Answer: {}", answer).green()),
                Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
            }
        }
        print!("> ");
        stdout.flush()?;
    }
    Ok(())
}

fn ask_once(client: &OllamaEmbedding, input: &str) -> CliResult<String> {
    let raw = client.prompt(input)?;
    debug!("raw generate response: {} bytes", raw.len());
    Ok(assemble_response(&raw)?)
}

fn read_stdin_lines() -> CliResult<Vec<String>> {
    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}
