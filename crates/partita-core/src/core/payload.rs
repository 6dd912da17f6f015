// crates/partita-core/src/core/payload.rs
// ============================================================================
// Module: Partita Payload
// Description: Opaque serialized response body produced by an output formatter.
// Purpose: Keep handlers format-agnostic by passing bytes, never structure.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Handlers never see the wire format: an output formatter hands back a
//! [`Payload`], and the transport writes it out together with the formatter's
//! content type. Payload bytes are final; nothing in the dispatch path
//! inspects or rewrites them.

// ============================================================================
// SECTION: Payload
// ============================================================================

/// Opaque serialized response body.
///
/// # Invariants
/// - Bytes are final once constructed; the dispatch path never rewrites them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(Vec<u8>);

impl Payload {
    /// Wraps serialized bytes.
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the payload bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the payload and returns the bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Returns the payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Payload {
    fn from(body: String) -> Self {
        Self(body.into_bytes())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}
