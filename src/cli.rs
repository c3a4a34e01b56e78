use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Portion Planner: allocates per-guest catering quantities across a menu.
#[derive(Parser, Debug)]
#[command(name = "portion_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Reference data JSON (categories, dishes, templates). Built-in catalog if omitted.
    #[arg(short, long, global = true)]
    pub reference: Option<PathBuf>,

    /// Engine config JSON overriding the default rates and limits.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Default)]
pub enum Command {
    /// Calculate portions for a request file.
    Calculate {
        /// Path to the calculate request JSON.
        #[arg(long)]
        request: PathBuf,

        /// Use a named menu template instead of the request's dish ids.
        #[arg(long)]
        template: Option<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,

        /// Also write the portions to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Check manually entered portions against the engine's rules.
    Check {
        /// Path to the check request JSON.
        #[arg(long)]
        request: PathBuf,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Build a menu interactively, then calculate it.
    #[default]
    Build,

    /// List the categories, dishes and templates of the reference data.
    Catalog,
}
