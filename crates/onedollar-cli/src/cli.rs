//! Command-Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use onedollar::Stage;

/// onedollar - recognize unistroke gestures against a template set
#[derive(Parser, Debug)]
#[command(name = "onedollar")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Recognizer configuration (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recognize a gesture document
    Recognize {
        /// Template set to match against
        #[arg(short, long)]
        templates: PathBuf,

        /// Gesture document (JSON)
        gesture: PathBuf,

        /// Also list the k closest templates
        #[arg(long)]
        top: Option<usize>,
    },

    /// Add a gesture to a template set, creating the file if needed
    Add {
        #[arg(short, long)]
        templates: PathBuf,

        /// Label to store the template under
        #[arg(short, long)]
        label: String,

        gesture: PathBuf,
    },

    /// List template labels in insertion order
    List {
        #[arg(short, long)]
        templates: PathBuf,
    },

    /// Print a gesture after running the pipeline up to a stage
    Stage {
        /// resample, rotate, scale, translate or normalize
        stage: Stage,

        gesture: PathBuf,
    },

    /// Print the effective configuration
    Config,
}
