use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cachesweep",
    about = "Build-agent cache cleaners: find stale tool caches and clean them",
    version
)]
pub struct Cli {
    /// Config file (default: <config dir>/cachesweep/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Set a configuration parameter, e.g. teamcity.cleaners.maven.enabled=false
    #[arg(long = "param", value_name = "KEY=VALUE", global = true)]
    pub params: Vec<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the available providers
    Providers,

    /// Register cleaners and show them (dry-run, no deletion)
    Scan {
        /// Only run a specific provider
        #[arg(long)]
        provider: Option<String>,
    },

    /// Run registered cleaners (requires --confirm to actually delete)
    Clean {
        /// Actually delete. Without this flag, behaves like scan.
        #[arg(long)]
        confirm: bool,

        /// Only run a specific provider
        #[arg(long)]
        provider: Option<String>,

        /// Only run cleaners stale for at least this many hours
        #[arg(long)]
        min_age_hours: Option<u64>,
    },
}
