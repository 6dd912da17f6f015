// crates/partita-core/src/runtime/mod.rs
// ============================================================================
// Module: Partita Runtime
// Description: Dispatch machinery and bundled collaborator implementations.
// Purpose: Wire methods, the registry, and the in-memory library together.
// Dependencies: crate::core, crate::interfaces, crate::methods
// ============================================================================

//! ## Overview
//! The runtime layer owns what the value and seam layers deliberately do
//! not: the action registry, the dispatcher that renders every failure, the
//! status snapshot retriever, and an in-memory library backend suitable for
//! embedded servers and tests.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod details;
pub mod dispatch;
pub mod memory;
