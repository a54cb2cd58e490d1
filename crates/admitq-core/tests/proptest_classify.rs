use admitq_core::ItemClass;
use proptest::prelude::*;

proptest! {
    #[test]
    fn classification_is_deterministic(id in any::<i64>()) {
        prop_assert_eq!(ItemClass::of(id), ItemClass::of(id));
    }

    #[test]
    fn classification_follows_divisibility(id in any::<i64>()) {
        let expected = match (id % 3 == 0, id % 5 == 0) {
            (true, true) => ItemClass::ManagementOverride,
            (true, false) => ItemClass::Priority,
            (false, true) => ItemClass::Vip,
            (false, false) => ItemClass::Normal,
        };
        prop_assert_eq!(ItemClass::of(id), expected);
    }

    #[test]
    fn multiples_of_fifteen_are_override(k in -100_000_000i64..100_000_000) {
        prop_assert!(ItemClass::of(k * 15).is_override());
    }

    #[test]
    fn non_multiples_of_fifteen_are_general(id in any::<i64>()) {
        prop_assume!(id % 15 != 0);
        prop_assert!(!ItemClass::of(id).is_override());
    }
}
