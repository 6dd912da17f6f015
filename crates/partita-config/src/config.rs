// crates/partita-config/src/config.rs
// ============================================================================
// Module: Partita Configuration
// Description: TOML configuration model and fail-closed validation.
// Purpose: Turn operator-supplied TOML into a validated `PartitaConfig`.
// Dependencies: partita-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded once at startup and never reloaded. `load` resolves
//! the file path (explicit flag, then environment variable, then the default
//! name), applies file-size and encoding limits before parsing, and runs
//! `validate` on the parsed document so a misconfigured server refuses to
//! start instead of serving with partial settings.
//!
//! Invariants:
//! - `load` returns only configs that passed `validate`.
//! - Every section deserializes with defaults, so an empty document parses;
//!   validation then decides whether the defaults are actually runnable.
//! - API keys are bounded in count and length and must be unique.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use partita_core::AccessLevel;
use partita_core::AuthToken;
use partita_core::Feature;
use partita_core::Session;
use partita_core::UserId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default config file name resolved relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "partita.toml";

/// Environment variable that overrides the default config path.
pub const CONFIG_ENV_VAR: &str = "PARTITA_CONFIG";

/// Maximum accepted config file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;

/// Maximum accepted config path length in bytes.
const MAX_CONFIG_PATH_LENGTH: usize = 4096;

/// Maximum number of configured API keys.
pub const MAX_API_KEYS: usize = 64;

/// Maximum accepted API token length in bytes.
pub const MAX_API_TOKEN_LENGTH: usize = 256;

/// Upper bound for the request body cap.
const MAX_BODY_BYTES_LIMIT: usize = 16 * 1024 * 1024;

// ============================================================================
// SECTION: Top-Level Config
// ============================================================================

/// Root configuration document.
///
/// # Invariants
/// - A value produced by [`PartitaConfig::load`] has already passed
///   [`PartitaConfig::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartitaConfig {
    /// Listener and authentication settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Optional subsystem toggles.
    #[serde(default)]
    pub features: FeaturesConfig,
}

impl PartitaConfig {
    /// Loads and validates configuration from disk.
    ///
    /// Path resolution order: the explicit `path` argument, then the
    /// `PARTITA_CONFIG` environment variable, then `partita.toml` in the
    /// working directory.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the file cannot be read, exceeds the size
    /// limit, is not UTF-8, fails to parse, or fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_config_path(path);
        validate_config_path(&resolved)?;
        let raw = fs::read(&resolved)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", resolved.display())))?;
        if raw.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid(format!(
                "config file exceeds {MAX_CONFIG_FILE_SIZE} bytes"
            )));
        }
        let text = String::from_utf8(raw)
            .map_err(|_| ConfigError::Parse("config file must be utf-8".to_owned()))?;
        let config: Self =
            toml::from_str(&text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the whole document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] describing the first rejected field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()
    }
}

/// Resolves the config path from the argument, environment, or default.
fn resolve_config_path(path: Option<&Path>) -> PathBuf {
    if let Some(explicit) = path {
        return explicit.to_path_buf();
    }
    if let Ok(from_env) = std::env::var(CONFIG_ENV_VAR) {
        if !from_env.trim().is_empty() {
            return PathBuf::from(from_env);
        }
    }
    PathBuf::from(DEFAULT_CONFIG_FILE)
}

/// Rejects empty or oversized config paths before touching the filesystem.
fn validate_config_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("config path must be non-empty".to_owned()));
    }
    if path.as_os_str().len() > MAX_CONFIG_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!(
            "config path exceeds {MAX_CONFIG_PATH_LENGTH} bytes"
        )));
    }
    Ok(())
}

// ============================================================================
// SECTION: Server Config
// ============================================================================

/// Listener settings for the API transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// API credential settings.
    #[serde(default)]
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Validates listener and credential settings.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] for an unparseable bind address or an
    /// out-of-range body cap, and propagates credential validation failures.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "server.bind is not a socket address: {}",
                self.bind
            )));
        }
        if self.max_body_bytes == 0 || self.max_body_bytes > MAX_BODY_BYTES_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "server.max_body_bytes must be between 1 and {MAX_BODY_BYTES_LIMIT}"
            )));
        }
        self.auth.validate()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
            auth: AuthConfig::default(),
        }
    }
}

/// Default loopback listener address.
fn default_bind() -> String {
    "127.0.0.1:7753".to_owned()
}

/// Default maximum request body size in bytes.
const fn default_max_body_bytes() -> usize {
    64 * 1024
}

// ============================================================================
// SECTION: Auth Config
// ============================================================================

/// API credential settings.
///
/// # Invariants
/// - A validated config carries at least one key and no duplicate tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Static API keys accepted by the authenticator.
    #[serde(default)]
    pub api_keys: Vec<ApiKeyConfig>,
}

impl AuthConfig {
    /// Validates the credential set.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] when no keys are configured, the key
    /// count exceeds [`MAX_API_KEYS`], any key is malformed, or two keys share
    /// a token.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_keys.is_empty() {
            return Err(ConfigError::Invalid(
                "server.auth.api_keys must contain at least one key".to_owned(),
            ));
        }
        if self.api_keys.len() > MAX_API_KEYS {
            return Err(ConfigError::Invalid(format!(
                "server.auth.api_keys exceeds {MAX_API_KEYS} entries"
            )));
        }
        let mut seen = BTreeSet::new();
        for key in &self.api_keys {
            key.validate()?;
            if !seen.insert(key.token.as_str()) {
                return Err(ConfigError::Invalid(
                    "server.auth.api_keys tokens must be unique".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

/// One static API key binding a token to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiKeyConfig {
    /// Secret token presented by the caller.
    pub token: String,
    /// Account id the token resolves to.
    pub user: u64,
    /// Permission level granted to the account.
    #[serde(default)]
    pub level: AccessLevel,
}

impl ApiKeyConfig {
    /// Validates one key entry.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] for an empty, whitespace-bearing, or
    /// oversized token, or a zero account id.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.is_empty() {
            return Err(ConfigError::Invalid("api key token must be non-empty".to_owned()));
        }
        if self.token.len() > MAX_API_TOKEN_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "api key token exceeds {MAX_API_TOKEN_LENGTH} bytes"
            )));
        }
        if self.token.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid(
                "api key token must not contain whitespace".to_owned(),
            ));
        }
        if self.user == 0 {
            return Err(ConfigError::Invalid(
                "api key user must be a positive account id".to_owned(),
            ));
        }
        Ok(())
    }

    /// Builds the credential pair this key grants.
    ///
    /// Returns `None` when the account id is zero; a validated config never
    /// hits that case.
    #[must_use]
    pub fn credential(&self) -> Option<(AuthToken, Session)> {
        let user = UserId::from_raw(self.user)?;
        Some((AuthToken::new(self.token.clone()), Session::new(user, self.level)))
    }
}

// ============================================================================
// SECTION: Features Config
// ============================================================================

/// Optional subsystem toggles.
///
/// Every toggle defaults to off; operators opt in per deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeaturesConfig {
    /// Enables podcast subscription and episode actions.
    #[serde(default)]
    pub podcasts: bool,
    /// Enables shared-link rendering contexts.
    #[serde(default)]
    pub shares: bool,
    /// Enables video library actions.
    #[serde(default)]
    pub videos: bool,
}

impl FeaturesConfig {
    /// Returns the set of enabled features for gate construction.
    #[must_use]
    pub fn enabled(&self) -> Vec<Feature> {
        let mut enabled = Vec::new();
        if self.podcasts {
            enabled.push(Feature::Podcasts);
        }
        if self.shares {
            enabled.push(Feature::Shares);
        }
        if self.videos {
            enabled.push(Feature::Videos);
        }
        enabled
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation failures.
///
/// Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Filesystem access failed.
    #[error("config io error: {0}")]
    Io(String),
    /// The document could not be decoded or parsed.
    #[error("config parse error: {0}")]
    Parse(String),
    /// The document parsed but failed validation.
    #[error("invalid config: {0}")]
    Invalid(String),
}
