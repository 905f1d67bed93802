//! md2notion - Markdown to Notion converter
//!
//! A CLI tool that uploads markdown files to Notion pages.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use md2notion::client::NotionClient;
use md2notion::config::{ConverterConfig, API_KEY_ENV};
use std::path::{Path, PathBuf};

/// Main entry point for the md2notion CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Push {
            file,
            page,
            mode,
            config,
            api_key,
            verbose,
        } => {
            init_logging(verbose);
            handle_push_command(file, page, mode, config, api_key)?;
        }

        Commands::Preview { file, verbose } => {
            init_logging(verbose);
            handle_preview_command(&file)?;
        }
    }

    Ok(())
}

/// Initialize logging; warnings are always shown
fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn read_markdown(file: &Path) -> Result<String> {
    std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read markdown file {}", file.display()))
}

/// Handle the push command
fn handle_push_command(
    file: PathBuf,
    page: Option<String>,
    mode: Option<md2notion::UpdateMode>,
    config_path: PathBuf,
    api_key: Option<String>,
) -> Result<()> {
    let config = ConverterConfig::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let env_key = std::env::var(API_KEY_ENV).ok();
    let api_key = config.resolve_api_key(api_key.as_deref(), env_key.as_deref())?;
    let page_id = config.resolve_page_id(page.as_deref())?;
    let mode = mode.unwrap_or(config.mode);

    let markdown = read_markdown(&file)?;
    let client = NotionClient::new(config.client_config(api_key))
        .context("Failed to create Notion client")?;

    println!("Uploading {} to page {} ({:?})...", file.display(), page_id, mode);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime
        .block_on(md2notion::markdown_to_notion(
            &client, &markdown, &page_id, mode,
        ))
        .with_context(|| format!("Failed to upload {}", file.display()))?;

    println!("✓ Successfully updated page {}", page_id);
    Ok(())
}

/// Handle the preview command
fn handle_preview_command(file: &Path) -> Result<()> {
    let markdown = read_markdown(file)?;
    let blocks = md2notion::markdown_to_blocks(&markdown);

    let json = serde_json::to_string_pretty(&blocks).context("Failed to serialize blocks")?;
    println!("{}", json);

    Ok(())
}
