// crates/partita-config/tests/common/mod.rs
// ============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for partita-config.
// ============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use partita_config::ApiKeyConfig;
use partita_config::PartitaConfig;
use partita_core::AccessLevel;

/// Parses a TOML string into a `PartitaConfig` for tests.
pub fn config_from_toml(toml_str: &str) -> Result<PartitaConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<PartitaConfig, toml::de::Error> {
    config_from_toml("")
}

/// Returns a minimal config carrying the provided API keys.
pub fn config_with_keys(api_keys: Vec<ApiKeyConfig>) -> Result<PartitaConfig, toml::de::Error> {
    let mut config = minimal_config()?;
    config.server.auth.api_keys = api_keys;
    Ok(config)
}

/// Returns one well-formed API key for the given token.
pub fn api_key(token: &str) -> ApiKeyConfig {
    ApiKeyConfig { token: token.to_owned(), user: 1, level: AccessLevel::User }
}
