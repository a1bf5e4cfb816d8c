//! # Quiz Primitives
//!
//! Hardcoded runtime constants for the advisor core.
//!
//! These values are compiled into the binary and are immutable at runtime.

/// Smallest weight a diagnostic option may carry.
pub const MIN_OPTION_WEIGHT: u8 = 1;

/// Largest weight a diagnostic option may carry.
///
/// Also the fixed per-question maximum added to the scoring denominator for
/// every answered diagnostic question.
pub const MAX_OPTION_WEIGHT: u8 = 4;

/// Highest score still classified as `reactive`.
pub const REACTIVE_MAX_SCORE: u8 = 33;

/// Highest score still classified as `structured`.
pub const STRUCTURED_MAX_SCORE: u8 = 66;

/// Upper bound of the normalized score.
pub const MAX_SCORE: u8 = 100;

/// Key of the single slot holding the in-progress session.
pub const SESSION_SLOT: &str = "clonk_advisor_state";

/// Magic bytes for the persisted session record.
///
/// - Record = Magic Bytes ("CLNK") + Version (u8) before payload.
pub const MAGIC_BYTES: &[u8; 4] = b"CLNK";

/// Current record format version.
///
/// Increment this when making breaking changes to the session layout.
pub const FORMAT_VERSION: u8 = 1;

/// Maximum size of a persisted session record (64 KiB).
///
/// A record this large cannot come from a valid session.
pub const MAX_RECORD_SIZE: usize = 64 * 1024;
