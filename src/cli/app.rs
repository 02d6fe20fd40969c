//! Main CLI application structure

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{check, compare, convert, dedupe, revision, sync_cmd};
use crate::remote::{DirSource, HttpSource, ReferenceSource};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "athkar")]
#[command(author, version, about = "Data-migration utilities for the athkar corpus")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./athkar.toml, then the user config dir)
    #[arg(long, short = 'c', global = true, env = "ATHKAR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert the raw dataset into the daily corpus
    Convert {
        /// Raw dataset (defaults to paths.dataset)
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Output corpus (defaults to paths.daily)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Remove duplicate texts from the daily corpus
    Dedupe {
        /// Corpus to reconcile in place (defaults to paths.daily)
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Report decisions without rewriting the file
        #[arg(long)]
        dry_run: bool,
    },

    /// Audit a corpus for duplicate ids, empty texts and order gaps
    Check {
        /// Corpus file (defaults to paths.daily, or paths.library with --library)
        path: Option<PathBuf>,

        /// Treat the file as a library corpus
        #[arg(long)]
        library: bool,
    },

    /// Compare local corpora with the reference service
    Compare {
        /// Read reference documents from a directory instead of the network
        #[arg(long, value_name = "DIR")]
        offline: Option<PathBuf>,

        /// HTML report path (defaults to paths.compare_report)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Rebuild both corpora from the reference service
    Sync {
        /// Read reference documents from a directory instead of the network
        #[arg(long, value_name = "DIR")]
        offline: Option<PathBuf>,

        /// Fetch and build without writing the corpora
        #[arg(long)]
        dry_run: bool,
    },

    /// Render an HTML listing of every record for review
    Revision {
        /// HTML output path (defaults to paths.revision_report)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    match &config.source {
        Some(path) => output.verbose(&format!("Loaded config from {}", path.display())),
        None => output.verbose("Using default configuration"),
    }

    match cli.command {
        Commands::Convert { input, output: out } => {
            convert::run(&output, &config, input.as_deref(), out.as_deref())?
        }
        Commands::Dedupe { input, dry_run } => {
            dedupe::run(&output, &config, input.as_deref(), dry_run)?
        }
        Commands::Check { path, library } => check::run(&output, &config, path.as_deref(), library)?,
        Commands::Compare { offline, output: out } => {
            let source = reference_source(&config, offline.as_deref())?;
            compare::run(&output, &config, source.as_ref(), out.as_deref())?
        }
        Commands::Sync { offline, dry_run } => {
            let source = reference_source(&config, offline.as_deref())?;
            let delay = if offline.is_some() {
                std::time::Duration::ZERO
            } else {
                config.remote.delay()
            };
            sync_cmd::run(&output, &config, source.as_ref(), delay, dry_run)?
        }
        Commands::Revision { output: out } => revision::run(&output, &config, out.as_deref())?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Picks the network client or a directory snapshot
fn reference_source(config: &Config, offline: Option<&Path>) -> Result<Box<dyn ReferenceSource>> {
    Ok(match offline {
        Some(dir) => Box::new(DirSource::new(dir, &config.remote.index)),
        None => Box::new(HttpSource::new(
            &config.remote.base_url,
            &config.remote.index,
            config.remote.timeout(),
        )?),
    })
}
