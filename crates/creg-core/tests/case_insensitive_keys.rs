//! Property tests for `CiKey`: any two spellings of a name that differ only
//! in case must collide in a map, and distinct names must not.

use std::collections::HashMap;

use creg_core::CiKey;
use proptest::prelude::*;

/// Flip the case of every other ASCII letter.
fn scramble_case(s: &str) -> String {
    s.chars()
        .enumerate()
        .map(|(i, c)| {
            if i % 2 == 0 {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn case_variants_share_a_slot(name in "[a-zA-Z][a-zA-Z0-9_]{0,24}") {
        let mut map = HashMap::new();
        map.insert(CiKey::new(name.clone()), 1u32);
        let upper = name.to_uppercase();
        let lower = name.to_lowercase();
        let scrambled = scramble_case(&name);
        prop_assert_eq!(map.get(&CiKey::new(upper)), Some(&1));
        prop_assert_eq!(map.get(&CiKey::new(lower)), Some(&1));
        prop_assert_eq!(map.get(&CiKey::new(scrambled)), Some(&1));
    }

    #[test]
    fn original_spelling_survives(name in "[a-zA-Z]{1,16}") {
        let key = CiKey::new(name.clone());
        prop_assert_eq!(key.as_str(), name.as_str());
    }

    #[test]
    fn distinct_names_do_not_collide(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        prop_assume!(a != b);
        prop_assert_ne!(CiKey::new(a.to_uppercase()), CiKey::new(b));
    }
}
