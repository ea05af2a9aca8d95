use fallacy_core::{classify, display_name};
use proptest::prelude::*;

proptest! {
    #[test]
    fn confidence_stays_in_unit_interval(s in ".*") {
        let result = classify(&s);
        prop_assert!((0.0..=1.0).contains(&result.confidence));
        prop_assert!(!result.explanation.is_empty());
    }

    #[test]
    fn classification_is_deterministic(s in ".{0,200}") {
        prop_assert_eq!(classify(&s), classify(&s));
    }

    #[test]
    fn ascii_case_does_not_matter(s in "[ -~]{0,120}") {
        let upper = classify(&s.to_ascii_uppercase());
        let lower = classify(&s.to_ascii_lowercase());
        prop_assert_eq!(upper, lower);
    }

    #[test]
    fn result_always_has_display_name(s in ".{0,200}") {
        let result = classify(&s);
        prop_assert!(result.category_id.is_known());
        prop_assert!(!display_name(&result.category_id).is_empty());
    }
}
