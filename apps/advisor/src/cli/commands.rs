//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::terminal;
use crate::api;
use advisor_core::{
    AdvisorError, Catalog, QuizEngine, Screen, SessionStore, StorageBackend,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of a TOML catalog (1 MB).
const MAX_CATALOG_FILE_SIZE: u64 = 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), AdvisorError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| AdvisorError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(AdvisorError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve `path` and make sure it is a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, AdvisorError> {
    let canonical = path.canonicalize().map_err(|e| {
        AdvisorError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(AdvisorError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

// =============================================================================
// STORE OPTIONS
// =============================================================================

/// Global options shared by every command.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Path of the redb store.
    pub database: PathBuf,
    /// "redb" or "memory".
    pub backend: String,
    /// Optional TOML catalog.
    pub catalog: Option<PathBuf>,
}

impl StoreOptions {
    /// Load the configured catalog, or the built-in one.
    pub fn load_catalog(&self) -> Result<Catalog, AdvisorError> {
        let Some(path) = &self.catalog else {
            return Ok(Catalog::builtin());
        };

        let validated = validate_file_path(path)?;
        validate_file_size(&validated, MAX_CATALOG_FILE_SIZE)?;
        let source = std::fs::read_to_string(&validated)
            .map_err(|e| AdvisorError::IoError(format!("Read catalog: {}", e)))?;

        let catalog = Catalog::from_toml_str(&source)?;
        tracing::info!(
            path = %validated.display(),
            questions = catalog.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Open the configured store.
    ///
    /// An unknown backend name is a usage error. A redb file that cannot be
    /// opened is not: the quiz then runs without persistence.
    pub fn open_store(&self) -> Result<SessionStore, AdvisorError> {
        let backend = match self.backend.as_str() {
            "redb" => StorageBackend::open_or_unavailable(&self.database),
            "memory" => StorageBackend::default(),
            other => {
                return Err(AdvisorError::IoError(format!(
                    "Unknown backend: {}. Use: redb, memory",
                    other
                )));
            }
        };
        Ok(SessionStore::new(backend))
    }

    /// Build an engine over the configured catalog and store.
    pub fn open_engine(&self) -> Result<QuizEngine, AdvisorError> {
        Ok(QuizEngine::new(self.load_catalog()?, self.open_store()?))
    }
}

// =============================================================================
// PLAY COMMAND
// =============================================================================

/// Take the quiz in the terminal.
pub fn cmd_play(options: &StoreOptions) -> Result<(), AdvisorError> {
    let mut engine = options.open_engine()?;

    if !engine.store().backend().is_durable() {
        tracing::warn!("progress will not be saved between runs");
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    terminal::run(&mut engine, stdin.lock(), stdout.lock())
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(options: &StoreOptions, host: &str, port: u16) -> Result<(), AdvisorError> {
    let engine = options.open_engine()?;

    println!("Clonk Advisor API Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Backend:  {}", engine.store().backend().name());
    println!("  Database: {:?}", options.database);
    println!();
    println!("Endpoints:");
    println!("  GET  /catalog          - Questions and options");
    println!("  GET  /session          - Current session");
    println!("  POST /session/start    - Begin the quiz");
    println!("  POST /session/answer   - Record an answer");
    println!("  POST /session/advance  - Next question / finish");
    println!("  POST /session/retreat  - Previous question");
    println!("  POST /session/restart  - Discard the attempt");
    println!("  GET  /results          - Score, level and recommendations");
    println!("  GET  /health           - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, engine).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show the saved session.
pub fn cmd_status(options: &StoreOptions, json_mode: bool) -> Result<(), AdvisorError> {
    let catalog = options.load_catalog()?;
    let store = options.open_store()?;
    let saved = store.try_read()?;

    if json_mode {
        let output = match &saved {
            Some(session) => serde_json::json!({
                "database": options.database.to_string_lossy(),
                "backend": store.backend().name(),
                "saved": true,
                "resumable": session.is_resumable(&catalog),
                "step": session.step,
                "screen": session.screen(&catalog),
                "answers": session.answers,
                "score": session.score,
                "level": session.level,
            }),
            None => serde_json::json!({
                "database": options.database.to_string_lossy(),
                "backend": store.backend().name(),
                "saved": false,
            }),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Clonk Advisor Session");
    println!("=====================");
    println!("Database: {:?}", options.database);
    println!("Backend:  {}", store.backend().name());
    println!();

    let Some(session) = saved else {
        println!("No saved session");
        return Ok(());
    };

    let screen = match session.screen(&catalog) {
        Screen::Welcome => "welcome".to_string(),
        Screen::Question { index } => format!("question {} of {}", index + 1, catalog.len()),
        Screen::Results => "results".to_string(),
    };
    println!("Step:      {} ({})", session.step, screen);
    println!(
        "Resumable: {}",
        if session.is_resumable(&catalog) { "yes" } else { "no" }
    );
    println!("Answers:   {}", session.answers.len());
    for (question, value) in &session.answers {
        println!("  {} = {}", question, value);
    }
    if let (Some(score), Some(level)) = (session.score, session.level) {
        println!();
        println!("Score: {} ({})", score, level);
    }

    Ok(())
}

// =============================================================================
// CATALOG COMMAND
// =============================================================================

/// Print the questions and options.
pub fn cmd_catalog(options: &StoreOptions, json_mode: bool) -> Result<(), AdvisorError> {
    let catalog = options.load_catalog()?;

    if json_mode {
        let output = serde_json::to_string_pretty(&catalog)
            .map_err(|e| AdvisorError::SerializationError(e.to_string()))?;
        println!("{}", output);
        return Ok(());
    }

    for (i, question) in catalog.questions().iter().enumerate() {
        println!(
            "{}. [{}] {} ({})",
            i + 1,
            question.id,
            question.text,
            question.kind.as_str()
        );
        for option in &question.options {
            match option.weight {
                Some(weight) => println!("     {:<12} {} (weight {})", option.value, option.label, weight),
                None => println!("     {:<12} {}", option.value, option.label),
            }
        }
    }

    Ok(())
}

// =============================================================================
// SCORE COMMAND
// =============================================================================

/// Parse `question=value` pairs.
pub fn parse_answers(raw: &[String]) -> Result<BTreeMap<String, String>, AdvisorError> {
    let mut answers = BTreeMap::new();
    for entry in raw {
        let Some((question, value)) = entry.split_once('=') else {
            return Err(AdvisorError::UnknownQuestion(entry.clone()));
        };
        answers.insert(question.trim().to_string(), value.trim().to_string());
    }
    Ok(answers)
}

/// Score a complete answer set. Nothing is persisted.
pub fn cmd_score(options: &StoreOptions, json_mode: bool, raw: &[String]) -> Result<(), AdvisorError> {
    let answers = parse_answers(raw)?;
    let mut engine = QuizEngine::new(options.load_catalog()?, SessionStore::in_memory());

    for id in answers.keys() {
        if engine.catalog().question(id).is_none() {
            return Err(AdvisorError::UnknownQuestion(id.clone()));
        }
    }

    engine.start();
    while let Some(question) = engine.current_question() {
        let id = question.id.clone();
        let Some(value) = answers.get(&id) else {
            tracing::error!(question = %id, "missing answer");
            return Err(AdvisorError::NotCompleted);
        };
        engine.select_option(&id, value)?;
        engine.advance();
    }

    let assessment = engine.assessment()?;

    if json_mode {
        let output = serde_json::json!({
            "score": assessment.score,
            "level": assessment.level,
            "total": assessment.card.total,
            "max": assessment.card.max,
            "name": assessment.profile.name,
            "diagnosis": assessment.profile.diagnosis,
            "wins": assessment.profile.wins,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Score: {} / 100", assessment.score);
    println!(
        "Level: {} {} ({})",
        assessment.profile.icon, assessment.profile.name, assessment.level
    );
    println!("Weights: {} of {}", assessment.card.total, assessment.card.max);

    Ok(())
}

// =============================================================================
// RESET COMMAND
// =============================================================================

/// Discard the saved session.
pub fn cmd_reset(options: &StoreOptions) -> Result<(), AdvisorError> {
    let mut store = options.open_store()?;
    store.try_clear()?;
    println!("Saved session cleared ({})", store.backend().name());
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
