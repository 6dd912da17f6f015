// crates/partita-config/src/lib.rs
// ============================================================================
// Module: Partita Config Library
// Description: Deployment configuration for the Partita API runtime.
// Purpose: Parse and validate operator-supplied TOML before the server starts.
// Dependencies: partita-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Partita Config loads deployment settings from TOML and validates them
//! before any request handling begins. Configuration covers the listener
//! address, request body limits, API credentials, and feature toggles.
//!
//! Invariants:
//! - Validation is fail-closed: a config that cannot be proven usable is
//!   rejected at startup, never repaired silently.
//! - Credential material is bounded: token count and token length have hard
//!   caps so a config file cannot balloon the authenticator.
//! - Absent sections fall back to conservative defaults; absent credentials
//!   are a validation error, not an open server.
//!
//! Security posture: rejects empty, whitespace-bearing, and duplicate API
//! tokens at load time; see `Docs/security/threat_model.md`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ApiKeyConfig;
pub use config::AuthConfig;
pub use config::CONFIG_ENV_VAR;
pub use config::ConfigError;
pub use config::DEFAULT_CONFIG_FILE;
pub use config::FeaturesConfig;
pub use config::MAX_API_KEYS;
pub use config::MAX_API_TOKEN_LENGTH;
pub use config::MAX_CONFIG_FILE_SIZE;
pub use config::PartitaConfig;
pub use config::ServerConfig;
