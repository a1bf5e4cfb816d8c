//! # Clonk Advisor
//!
//! The main binary for the shift-scheduling maturity quiz.
//!
//! This application provides:
//! - Interactive terminal quiz
//! - HTTP API for a browser front-end
//! - CLI commands to inspect or reset the saved session
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                 apps/advisor (THE BINARY)             │
//! │                                                       │
//! │  ┌─────────────┐   ┌─────────────┐   ┌────────────┐   │
//! │  │   CLI       │   │  Terminal   │   │  HTTP API  │   │
//! │  │  (clap)     │   │  front-end  │   │  (axum)    │   │
//! │  └──────┬──────┘   └──────┬──────┘   └─────┬──────┘   │
//! │         └─────────────────┼────────────────┘          │
//! │                           ▼                           │
//! │                   ┌───────────────┐                   │
//! │                   │ advisor-core  │                   │
//! │                   │ (THE LOGIC)   │                   │
//! │                   └───────────────┘                   │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Take the quiz in the terminal
//! advisor play
//!
//! # Serve the API for a browser front-end
//! advisor server --host 127.0.0.1 --port 8080
//!
//! # Score a complete answer set
//! advisor score -a business_type=hotel -a employee_count=1-10 \
//!     -a scheduling_method=excel -a overtime_tracking=many -a schedule_changes=rare
//! ```

use advisor::cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing. ADVISOR_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("ADVISOR_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    let default_filter = if cli.verbose {
        "advisor=debug,advisor_core=debug,tower_http=debug"
    } else {
        "advisor=info,advisor_core=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr; stdout belongs to the quiz and command output.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
   ____ _             _
  / ___| | ___  _ __ | | __
 | |   | |/ _ \| '_ \| |/ /
 | |___| | (_) | | | |   <
  \____|_|\___/|_| |_|_|\_\  Advisor v{}

  Diagnóstico de Gestión de Turnos
"#,
        env!("CARGO_PKG_VERSION")
    );
}
