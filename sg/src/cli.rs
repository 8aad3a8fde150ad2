//! CLI argument parsing for snowgen

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sg")]
#[command(author, version, about = "Generate Snowplow dbt projects from brand configs", long_about = None)]
pub struct Cli {
    /// Path to settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute (defaults to `batch`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate projects for every brand config in a directory
    Batch {
        /// Directory containing <brand>.json files
        #[arg(long)]
        config_dir: Option<PathBuf>,

        /// Base directory for generated projects
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Write a settings file holding the current settings
    Init {
        /// Where to write the settings file
        #[arg(default_value = ".snowgen.yml")]
        path: PathBuf,

        /// Overwrite an existing settings file
        #[arg(short, long)]
        force: bool,
    },

    /// Generate the project for a single brand config
    Brand {
        /// Brand config JSON file
        #[arg(required = true)]
        config_file: PathBuf,

        /// Directory to write the project into (default: <output-dir>/<file stem>)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}
