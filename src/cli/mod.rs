//! CLI interface for geoqa.
//!
//! Provides command-line argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{DEFAULT_CATEGORY, DEFAULT_DIFFICULTY};

/// Command-line interface for geoqa.
#[derive(Parser)]
#[command(name = "geoqa")]
#[command(author, version, about = "Geography question answering", long_about = None)]
pub struct Cli {
    /// Dataset file to use instead of the configured one.
    #[arg(short = 'D', long, global = true)]
    pub dataset: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Answer a geography question.
    Ask {
        /// The question to answer.
        question: String,

        /// Also print how the answer was found.
        #[arg(short, long)]
        explain: bool,
    },

    /// Add a question and answer to the dataset.
    Add {
        /// Question text.
        #[arg(short, long)]
        question: String,

        /// Answer text.
        #[arg(short, long)]
        answer: String,

        /// Category for grouping (e.g., "河流", "省会城市").
        #[arg(short = 'C', long, default_value = DEFAULT_CATEGORY)]
        category: String,

        /// Difficulty label.
        #[arg(short, long, default_value = DEFAULT_DIFFICULTY)]
        difficulty: String,
    },

    /// List questions in the dataset.
    List {
        /// Filter results to this category only.
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List the categories in the dataset.
    Categories,

    /// Show dataset statistics.
    Stats,
}
