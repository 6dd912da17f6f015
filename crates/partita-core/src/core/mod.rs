// crates/partita-core/src/core/mod.rs
// ============================================================================
// Module: Partita Core Types
// Description: Value types shared across the dispatch pipeline.
// Purpose: Define identifiers, requests, errors, and snapshot values.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core value types for the API gateway. Everything here is a plain value:
//! no I/O, no locks, no collaborator references. Seam traits live in
//! [`crate::interfaces`]; the dispatch machinery lives in [`crate::runtime`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod access;
pub mod details;
pub mod error;
pub mod identifiers;
pub mod payload;
pub mod request;
pub mod resource;
pub mod version;
