//! # Formats Module
//!
//! Byte-level encodings of core state. File and database I/O live in
//! `storage`.

mod persistence;

pub use persistence::*;
