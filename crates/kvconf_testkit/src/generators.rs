//! Property-based test generators using proptest.
//!
//! Provides strategies for generating configuration keys, values, key
//! spaces and operation sequences.

use kvconf_core::ConfigObject;
use proptest::prelude::*;
use std::collections::BTreeMap;

/// Strategy for generating valid configuration keys.
///
/// Keys look like dotted configuration paths (`app.http.timeout`) and never
/// contain glob metacharacters, so they can be used verbatim as patterns.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,7}(\\.[a-z0-9_]{1,8}){0,3}")
        .expect("Invalid regex")
}

/// Strategy for generating non-empty values.
pub fn value_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ -~]{1,32}").expect("Invalid regex")
}

/// Strategy for generating a key space of up to `max_keys` distinct keys.
pub fn key_space_strategy(max_keys: usize) -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(key_strategy(), value_strategy(), 0..=max_keys)
}

/// Strategy for generating match patterns that exercise the glob syntax.
pub fn pattern_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("*".to_string()),
        prop::string::string_regex("[a-z]{1,2}").expect("Invalid regex").prop_map(|p| format!("{p}*")),
        prop::string::string_regex("[a-z]{1,2}").expect("Invalid regex").prop_map(|p| format!("*{p}*")),
        Just("?*".to_string()),
        Just("[a-m]*".to_string()),
        Just("[^a-m]*".to_string()),
        Just("*.*".to_string()),
    ]
}

/// Strategy for generating page sizes within the accepted range.
pub fn limit_strategy() -> impl Strategy<Value = u32> {
    kvconf_core::MIN_LIMIT..=kvconf_core::MAX_LIMIT
}

/// A single operation against the configuration API.
#[derive(Debug, Clone)]
pub enum ConfigOperation {
    /// Create or overwrite an object.
    Create(ConfigObject),
    /// Read a key.
    Get {
        /// Key to read.
        key: String,
    },
    /// Delete a key.
    Delete {
        /// Key to delete.
        key: String,
    },
}

/// Strategy for generating configuration operations.
pub fn config_operation_strategy() -> impl Strategy<Value = ConfigOperation> {
    prop_oneof![
        3 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| ConfigOperation::Create(ConfigObject::new(key, value))),
        1 => key_strategy().prop_map(|key| ConfigOperation::Delete { key }),
        2 => key_strategy().prop_map(|key| ConfigOperation::Get { key }),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<ConfigOperation>> {
    prop::collection::vec(config_operation_strategy(), min_ops..max_ops)
}

/// Short proptest run for suites that drive an async store per case.
pub fn quick_config() -> ProptestConfig {
    ProptestConfig {
        cases: 32,
        max_shrink_iters: 100,
        ..ProptestConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvconf_store::glob_match;

    proptest! {
        #![proptest_config(quick_config())]

        #[test]
        fn keys_are_non_empty_and_literal(key in key_strategy()) {
            prop_assert!(!key.is_empty());
            prop_assert!(!key.contains(['*', '?', '[', ']', '\\']));
            prop_assert!(glob_match(&key, &key));
        }

        #[test]
        fn values_are_non_empty(value in value_strategy()) {
            prop_assert!(!value.is_empty());
        }

        #[test]
        fn key_space_respects_bound(space in key_space_strategy(10)) {
            prop_assert!(space.len() <= 10);
        }

        #[test]
        fn limits_are_in_range(limit in limit_strategy()) {
            prop_assert!((1..=100).contains(&limit));
        }
    }

    #[test]
    fn quick_config_keeps_runs_short() {
        let config = quick_config();
        assert_eq!(config.cases, 32);
        assert_eq!(config.max_shrink_iters, 100);
        assert_eq!(config.max_global_rejects, ProptestConfig::default().max_global_rejects);
    }
}
