// crates/partita-config/tests/auth_validation.rs
// ============================================================================
// Module: Auth Config Validation Tests
// Description: Tests for API key constraints and credential mapping.
// Purpose: Ensure credential validation is fail-closed and enforces limits.
// ============================================================================

//! API key validation tests for partita-config.

use partita_config::ApiKeyConfig;
use partita_config::ConfigError;
use partita_config::MAX_API_KEYS;
use partita_config::MAX_API_TOKEN_LENGTH;
use partita_core::AccessLevel;

mod common;

type TestResult = Result<(), String>;

/// Assert that a validation result is an error containing a specific substring.
fn assert_invalid(result: Result<(), ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(()) => Err("expected invalid config".to_string()),
    }
}

// ============================================================================
// SECTION: Token Constraints
// ============================================================================

#[test]
fn validate_rejects_empty_token() -> TestResult {
    let config =
        common::config_with_keys(vec![common::api_key("")]).map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "must be non-empty")?;
    Ok(())
}

#[test]
fn validate_rejects_token_with_whitespace() -> TestResult {
    let config = common::config_with_keys(vec![common::api_key("alpha key")])
        .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "must not contain whitespace")?;
    Ok(())
}

#[test]
fn validate_rejects_token_with_trailing_whitespace() -> TestResult {
    let config = common::config_with_keys(vec![common::api_key("alpha-key ")])
        .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "must not contain whitespace")?;
    Ok(())
}

#[test]
fn validate_rejects_oversized_token() -> TestResult {
    let long_token = "a".repeat(MAX_API_TOKEN_LENGTH + 1);
    let config = common::config_with_keys(vec![common::api_key(&long_token)])
        .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "exceeds")?;
    Ok(())
}

#[test]
fn validate_accepts_token_at_length_limit() -> TestResult {
    let token = "a".repeat(MAX_API_TOKEN_LENGTH);
    let config =
        common::config_with_keys(vec![common::api_key(&token)]).map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    Ok(())
}

// ============================================================================
// SECTION: Key Set Constraints
// ============================================================================

#[test]
fn validate_rejects_duplicate_tokens() -> TestResult {
    let config =
        common::config_with_keys(vec![common::api_key("alpha-key"), common::api_key("alpha-key")])
            .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "must be unique")?;
    Ok(())
}

#[test]
fn validate_rejects_too_many_keys() -> TestResult {
    let keys: Vec<ApiKeyConfig> =
        (0..=MAX_API_KEYS).map(|index| common::api_key(&format!("key-{index}"))).collect();
    let config = common::config_with_keys(keys).map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "exceeds")?;
    Ok(())
}

#[test]
fn validate_rejects_zero_user_id() -> TestResult {
    let mut key = common::api_key("alpha-key");
    key.user = 0;
    let config = common::config_with_keys(vec![key]).map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "positive account id")?;
    Ok(())
}

#[test]
fn validate_accepts_distinct_tokens_for_same_user() -> TestResult {
    let config =
        common::config_with_keys(vec![common::api_key("alpha-key"), common::api_key("beta-key")])
            .map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    Ok(())
}

// ============================================================================
// SECTION: Credential Mapping
// ============================================================================

#[test]
fn credential_carries_account_and_level() -> TestResult {
    let key = ApiKeyConfig {
        token: "alpha-key".to_owned(),
        user: 9,
        level: AccessLevel::Administrator,
    };
    let Some((token, session)) = key.credential() else {
        return Err("expected a credential for a valid key".to_string());
    };
    if token.as_str() != "alpha-key" {
        return Err(format!("unexpected token: {}", token.as_str()));
    }
    if session.user_id.get() != 9 {
        return Err(format!("unexpected account: {}", session.user_id));
    }
    if session.level != AccessLevel::Administrator {
        return Err(format!("unexpected level rank: {}", session.level));
    }
    Ok(())
}

#[test]
fn credential_refuses_zero_account_id() -> TestResult {
    let key = ApiKeyConfig { token: "alpha-key".to_owned(), user: 0, level: AccessLevel::User };
    if key.credential().is_some() {
        return Err("expected no credential for a zero account id".to_string());
    }
    Ok(())
}

#[test]
fn level_parses_from_snake_case_name() -> TestResult {
    let config = common::config_from_toml(
        r#"
        [[server.auth.api_keys]]
        token = "alpha-key"
        user = 1
        level = "content_manager"
        "#,
    )
    .map_err(|err| err.to_string())?;
    let level = config.server.auth.api_keys[0].level;
    if level != AccessLevel::ContentManager {
        return Err(format!("unexpected level rank: {level}"));
    }
    Ok(())
}

#[test]
fn level_defaults_to_user_when_absent() -> TestResult {
    let config = common::config_from_toml(
        r#"
        [[server.auth.api_keys]]
        token = "alpha-key"
        user = 1
        "#,
    )
    .map_err(|err| err.to_string())?;
    let level = config.server.auth.api_keys[0].level;
    if level != AccessLevel::User {
        return Err(format!("unexpected default level rank: {level}"));
    }
    Ok(())
}
