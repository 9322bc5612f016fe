//! # docgen
//!
//! Assemble a manual from a content directory and export a running
//! rendering of it into a static file tree.

mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::LogDestination;

#[derive(Parser)]
#[command(name = "docgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Where log output goes
    #[arg(long, value_enum, default_value = "terminal", global = true)]
    log: LogDestination,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the manual and print a summary
    Assemble {
        /// The location of the content directory. Defaults to the current directory
        #[arg(short, long, env = "DOCGEN_CONTENT")]
        content: Option<PathBuf>,

        /// Print the whole manual as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the routes a rendered manual exposes
    Routes {
        /// The location of the content directory. Defaults to the current directory
        #[arg(short, long, env = "DOCGEN_CONTENT")]
        content: Option<PathBuf>,
    },

    /// Export a running rendering of the manual into static files
    Gen {
        /// The location of the content directory. Defaults to the current directory
        #[arg(short, long, env = "DOCGEN_CONTENT")]
        content: Option<PathBuf>,

        /// The destination that the files will be written to. Defaults to <content>/output
        #[arg(short, long)]
        dest: Option<PathBuf>,

        /// Base URL of the host serving the rendered manual
        #[arg(long, env = "DOCGEN_HOST")]
        host: String,

        /// Path to a RON config file. Defaults to <content>/docgen.ron when present
        #[arg(long = "config")]
        config_path: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);

    match cli.command {
        Commands::Assemble { content, json } => {
            let content = commands::content_dir(content)?;
            commands::assemble(&content, json)
        }
        Commands::Routes { content } => {
            let content = commands::content_dir(content)?;
            commands::routes(&content)
        }
        Commands::Gen {
            content,
            dest,
            host,
            config_path,
        } => {
            let content = commands::content_dir(content)?;
            let dest = dest.unwrap_or_else(|| commands::default_destination(&content));
            let config = config::load(config_path.as_deref(), &content)?;
            commands::generate(&content, &dest, &host, &config)
        }
    }
}
