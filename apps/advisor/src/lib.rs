//! # advisor
//!
//! Presentation adapters for the Clonk Advisor quiz engine: the CLI, the
//! interactive terminal front-end and the HTTP API. Exposed as a library so
//! integration tests can drive them without spawning the binary.

pub mod api;
pub mod cli;
