// crates/partita-output/src/lib.rs
// ============================================================================
// Module: Partita Output Library
// Description: Wire-format serializers behind the output port.
// Purpose: Render dispatch results as JSON payloads.
// Dependencies: partita-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Partita Output provides the [`JsonOutput`] formatter behind the
//! [`partita_core::ApiOutput`] port. Handlers stay format-agnostic: they hand
//! over identifiers and messages, and this crate resolves records and renders
//! envelopes.
//! Invariants:
//! - Envelope shapes are stable wire contracts; keys never change casing.
//! - Identical inputs render byte-identical payloads.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod json;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use json::JsonOutput;
