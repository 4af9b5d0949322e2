use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Groundwork - deployment bootstrap tool
#[derive(Parser, Debug)]
#[command(name = "groundwork")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for orchestrators/CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full bootstrap: install dependencies, then provision directories
    Run {
        /// Path to the config file (defaults to ./groundwork.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Dependency manifest (overrides config)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Persistent-volume mount point (overrides config)
        #[arg(long)]
        mount: Option<PathBuf>,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,
    },

    /// Install dependencies only
    Install {
        /// Path to the config file (defaults to ./groundwork.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Dependency manifest (overrides config)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,
    },

    /// Provision persistent-disk directories only
    Provision {
        /// Path to the config file (defaults to ./groundwork.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Persistent-volume mount point (overrides config)
        #[arg(long)]
        mount: Option<PathBuf>,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate the bootstrap environment without mutating it
    Check {
        /// Path to the config file (defaults to ./groundwork.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Fail on warnings too (CI mode)
        #[arg(long)]
        strict_warnings: bool,
    },
}
