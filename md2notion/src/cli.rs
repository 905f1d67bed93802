//! Command-line interface definitions for md2notion

use clap::{Parser, Subcommand};
use md2notion::UpdateMode;
use std::path::PathBuf;

/// CLI structure for the md2notion application
#[derive(Parser)]
#[command(name = "md2notion")]
#[command(version)]
#[command(about = "Convert markdown files into Notion pages", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for md2notion
#[derive(Subcommand)]
pub enum Commands {
    /// Upload a markdown file to a Notion page
    Push {
        /// Markdown file to upload
        file: PathBuf,

        /// Destination page id (defaults to page_id from the config file)
        #[arg(short, long)]
        page: Option<String>,

        /// Replace the page content or append to it (defaults to the config file)
        #[arg(short, long, value_enum)]
        mode: Option<UpdateMode>,

        /// Configuration file
        #[arg(short, long, default_value = md2notion::config::CONFIG_FILE_NAME)]
        config: PathBuf,

        /// Notion integration token (overrides NOTION_API_KEY and the config file)
        #[arg(long)]
        api_key: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the Notion blocks for a markdown file without uploading
    Preview {
        /// Markdown file to convert
        file: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}
