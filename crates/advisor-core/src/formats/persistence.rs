//! # Session Record Format
//!
//! Binary serialization for persisted sessions.
//!
//! Format: Header (5 bytes) + postcard-serialized session.
//! - 4 bytes: Magic ("CLNK")
//! - 1 byte: Version
//!
//! Validation happens before the payload is decoded:
//! - Maximum record size (`MAX_RECORD_SIZE`)
//! - Header magic and version

use crate::{AdvisorError, Session, primitives};

/// Minimum valid record size (header only).
const HEADER_SIZE: usize = 5;

// =============================================================================
// RECORD HEADER
// =============================================================================

/// The header that precedes every session record.
#[derive(Debug, Clone, Copy)]
pub struct RecordHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl RecordHeader {
    /// Create a new header with the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *primitives::MAGIC_BYTES,
            version: primitives::FORMAT_VERSION,
        }
    }

    /// Validate the header.
    pub fn validate(&self) -> Result<(), AdvisorError> {
        if &self.magic != primitives::MAGIC_BYTES {
            return Err(AdvisorError::SerializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != primitives::FORMAT_VERSION {
            return Err(AdvisorError::SerializationError(format!(
                "Unsupported version: {} (expected {})",
                self.version,
                primitives::FORMAT_VERSION
            )));
        }
        Ok(())
    }

    /// Write header to bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    /// Read header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AdvisorError> {
        if bytes.len() < HEADER_SIZE {
            return Err(AdvisorError::SerializationError(
                "Header too short".to_string(),
            ));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for RecordHeader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// SERIALIZATION FUNCTIONS
// =============================================================================

/// Serialize a session to bytes (header + payload).
pub fn session_to_bytes(session: &Session) -> Result<Vec<u8>, AdvisorError> {
    let header = RecordHeader::new();
    let payload = postcard::to_stdvec(session)
        .map_err(|e| AdvisorError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(HEADER_SIZE + payload.len());
    result.extend_from_slice(&header.to_bytes());
    result.extend_from_slice(&payload);

    Ok(result)
}

/// Deserialize a session from bytes.
pub fn session_from_bytes(bytes: &[u8]) -> Result<Session, AdvisorError> {
    if bytes.len() < HEADER_SIZE {
        return Err(AdvisorError::SerializationError(
            "Data too short: minimum 5 bytes required".to_string(),
        ));
    }

    if bytes.len() > primitives::MAX_RECORD_SIZE {
        return Err(AdvisorError::SerializationError(format!(
            "Record size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            primitives::MAX_RECORD_SIZE
        )));
    }

    let header = RecordHeader::from_bytes(bytes)?;
    header.validate()?;

    postcard::from_bytes(&bytes[HEADER_SIZE..]).map_err(|e| {
        AdvisorError::SerializationError(format!("Failed to deserialize session: {}", e))
    })
}

// =============================================================================
// TESTS
// =============================================================================
