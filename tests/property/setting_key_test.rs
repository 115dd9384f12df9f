//! Property-based tests for setting-key derivation.
//!
//! Load and save of the settings map rely on every slider label mapping to
//! the same key every time, and on keys only ever containing word
//! characters. These tests pin both down for arbitrary labels.

use lobbydeck::services::settings::setting_key;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Keys contain nothing but lowercase alphanumerics and underscores,
    // whatever the label throws at the function.
    #[test]
    fn key_alphabet_is_word_characters_only(label in "\\PC{0,40}") {
        let key = setting_key(&label);
        prop_assert!(
            key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
            "unexpected character in key {:?} for label {:?}",
            key,
            label
        );
    }

    // Derivation is a pure function of the label.
    #[test]
    fn derivation_is_deterministic(label in "\\PC{0,40}") {
        prop_assert_eq!(setting_key(&label), setting_key(&label));
    }

    // A derived key is already in canonical form, so deriving again is a
    // no-op. This is what makes load/save round-trip without key drift.
    #[test]
    fn derivation_is_idempotent(label in "\\PC{0,40}") {
        let key = setting_key(&label);
        prop_assert_eq!(setting_key(&key), key);
    }

    // Whitespace placement only ever produces underscores, never loses
    // the surrounding word characters.
    #[test]
    fn words_survive_arbitrary_whitespace(
        first in "[a-z]{1,8}",
        second in "[a-z]{1,8}",
        gap in " {1,5}",
    ) {
        let label = format!("{}{}{}", first, gap, second);
        prop_assert_eq!(setting_key(&label), format!("{}_{}", first, second));
    }
}
