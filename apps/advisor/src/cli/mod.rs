//! # Advisor CLI Module
//!
//! This module implements the CLI interface for Clonk Advisor.
//!
//! ## Available Commands
//!
//! - `play` - Take the quiz interactively (default)
//! - `server` - Start the HTTP server
//! - `status` - Show the saved session
//! - `catalog` - Print the questions and options
//! - `score` - Score a complete answer set
//! - `reset` - Discard the saved session

mod commands;
pub mod terminal;

use advisor_core::AdvisorError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Clonk Advisor - shift-scheduling maturity quiz
///
/// Answer five questions, get a maturity score, a level and three quick wins.
#[derive(Parser, Debug)]
#[command(name = "advisor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the local session store
    #[arg(short = 'D', long, global = true, default_value = "advisor.db")]
    pub database: PathBuf,

    /// Storage backend: "redb" (durable file) or "memory" (this process only)
    #[arg(short = 'B', long, global = true, default_value = "redb")]
    pub backend: String,

    /// Question catalog in TOML (defaults to the built-in catalog)
    #[arg(short = 'C', long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Take the quiz in the terminal
    Play,

    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Show the saved session
    Status,

    /// Print the question catalog
    Catalog,

    /// Score a complete answer set without saving anything
    Score {
        /// Answer as question_id=value (repeat for every question)
        #[arg(short, long = "answer", value_name = "QUESTION=VALUE")]
        answers: Vec<String>,
    },

    /// Discard the saved session
    Reset,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), AdvisorError> {
    let options = StoreOptions {
        database: cli.database,
        backend: cli.backend,
        catalog: cli.catalog,
    };
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => cmd_server(&options, &host, port).await,
        Some(Commands::Status) => cmd_status(&options, json_mode),
        Some(Commands::Catalog) => cmd_catalog(&options, json_mode),
        Some(Commands::Score { answers }) => cmd_score(&options, json_mode, &answers),
        Some(Commands::Reset) => cmd_reset(&options),
        Some(Commands::Play) | None => cmd_play(&options),
    }
}
