// crates/partita-core/tests/proptest_params.rs
// ============================================================================
// Module: Parameter and Identifier Property Tests
// Description: Property tests for request parsing primitives.
// Purpose: Detect panics and contract violations across wide input ranges.
// ============================================================================

//! Property-based tests for parameter access, identifier parsing, and
//! access-level ordering.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use partita_core::AccessLevel;
use partita_core::ApiError;
use partita_core::Parameters;
use partita_core::SongId;
use proptest::prelude::*;

fn access_level_strategy() -> impl Strategy<Value = AccessLevel> {
    prop_oneof![
        Just(AccessLevel::Guest),
        Just(AccessLevel::User),
        Just(AccessLevel::ContentManager),
        Just(AccessLevel::Manager),
        Just(AccessLevel::Administrator),
    ]
}

proptest! {
    #[test]
    fn required_returns_the_stored_value_or_names_the_key(
        key in "[a-z_]{1,12}",
        value in ".{0,24}",
        populate in any::<bool>(),
    ) {
        let parameters = if populate {
            Parameters::from_pairs([(key.clone(), value.clone())])
        } else {
            Parameters::new()
        };
        match parameters.required(&key) {
            Ok(stored) => {
                prop_assert!(populate);
                prop_assert_eq!(stored, value.as_str());
            }
            Err(error) => {
                prop_assert!(!populate);
                prop_assert_eq!(error, ApiError::RequestParamMissing { subject: key.clone() });
            }
        }
    }

    #[test]
    fn numeric_identifiers_round_trip_through_parsing(raw in 1_u64..) {
        let parsed = SongId::parse(&raw.to_string());
        prop_assert_eq!(parsed, SongId::from_raw(raw));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated(raw in 1_u64..=1_000_000_u64, pad in "[ \t]{0,3}") {
        let decorated = format!("{pad}{raw}{pad}");
        prop_assert_eq!(SongId::parse(&decorated), SongId::from_raw(raw));
    }

    #[test]
    fn non_numeric_filters_never_parse(raw in "[a-zA-Z][a-zA-Z0-9_-]{0,16}") {
        prop_assert_eq!(SongId::parse(&raw), None);
    }

    #[test]
    fn zero_and_negative_filters_never_parse(raw in prop_oneof![
        Just("0".to_owned()),
        Just("-1".to_owned()),
        Just("".to_owned()),
    ]) {
        prop_assert_eq!(SongId::parse(&raw), None);
    }

    #[test]
    fn grants_agrees_with_rank_ordering(
        held in access_level_strategy(),
        minimum in access_level_strategy(),
    ) {
        prop_assert_eq!(held.grants(minimum), held.rank() >= minimum.rank());
    }

    #[test]
    fn ranks_round_trip_through_from_rank(level in access_level_strategy()) {
        prop_assert_eq!(AccessLevel::from_rank(level.rank()), Some(level));
    }
}
