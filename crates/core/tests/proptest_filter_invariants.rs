//! Property-based invariant tests for category filtering.
//!
//! 1. A filtered view is an order-preserving subsequence of the catalog.
//! 2. Filtering by `all` is the identity.
//! 3. Every item kept by a concrete filter carries that value.
//! 4. Available classifications are unique, first-seen ordered and stable.
//! 5. Setting the same filter twice leaves the view unchanged.
//! 6. Visibility ratios stay in `[0, 1]` for any geometry.

use folio_core::model::{CategoryFilterList, FilterControls, available_classifications, derive};
use folio_protocol::{Catalog, Classification, FilterValue, Item, Rect};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

const VOCABULARY: &[&str] = &[
    "JavaScript", "Node.js", "MongoDB", "Python", "CSharp", "frontend", "backend", "design",
];

fn value_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(VOCABULARY)
}

fn classification_strategy() -> impl Strategy<Value = Classification> {
    prop_oneof![
        value_strategy().prop_map(Classification::single),
        prop::collection::vec(value_strategy(), 0..4).prop_map(Classification::tags),
    ]
}

fn items_strategy() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(classification_strategy(), 0..24).prop_map(|classes| {
        classes
            .into_iter()
            .enumerate()
            .map(|(i, c)| Item::new(i as u32, format!("item {i}"), c))
            .collect()
    })
}

fn filter_strategy() -> impl Strategy<Value = FilterValue> {
    prop_oneof![
        Just(FilterValue::All),
        value_strategy().prop_map(FilterValue::from),
        Just(FilterValue::from("Rust")),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Subsequence preserving order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn view_is_ordered_subsequence(items in items_strategy(), filter in filter_strategy()) {
        let view = derive(&items, &filter);
        let mut cursor = items.iter();
        for kept in &view {
            prop_assert!(
                cursor.any(|item| std::ptr::eq(item, *kept)),
                "item {} out of order for filter {}", kept.id, filter
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Identity law
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn all_is_identity(items in items_strategy()) {
        let view = derive(&items, &FilterValue::parse("all"));
        prop_assert_eq!(view.len(), items.len());
        for (kept, item) in view.iter().zip(&items) {
            prop_assert_eq!(*kept, item);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Membership
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn kept_items_carry_the_value(items in items_strategy(), value in value_strategy()) {
        let filter = FilterValue::from(value);
        let view = derive(&items, &filter);
        for item in &view {
            prop_assert!(item.classification.contains(value));
        }
        let expected = items.iter().filter(|i| i.classification.contains(value)).count();
        prop_assert_eq!(view.len(), expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Unique, first-seen, stable classifications
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn classifications_unique_and_stable(items in items_strategy()) {
        let first = available_classifications(&items);
        let again = available_classifications(&items);
        prop_assert_eq!(&first, &again);

        let mut seen = std::collections::HashSet::new();
        for value in &first {
            prop_assert!(seen.insert(value.as_str()), "duplicate {}", value);
        }

        let flattened: Vec<&str> = items
            .iter()
            .flat_map(|i| i.classification.values())
            .map(|v| v.as_str())
            .collect();
        let positions: Vec<usize> = first
            .iter()
            .filter_map(|v| flattened.iter().position(|f| *f == v.as_str()))
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(seen.len(), flattened.iter().collect::<std::collections::HashSet<_>>().len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. set_filter idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn set_filter_twice_is_idempotent(items in items_strategy(), filter in filter_strategy()) {
        let mut list = CategoryFilterList::new(Catalog::new(items), FilterControls::Derived);
        list.set_filter(filter.clone());
        let before: Vec<u32> = list.view().iter().map(|i| i.id.0).collect();
        let revision = list.revision();
        prop_assert!(!list.set_filter(filter));
        let after: Vec<u32> = list.view().iter().map(|i| i.id.0).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(list.revision(), revision);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Intersection ratio bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ratio_in_unit_interval(
        y in -2000.0f64..4000.0,
        h in 0.0f64..3000.0,
        scroll in 0.0f64..4000.0,
    ) {
        let region = Rect::new(0.0, y, 800.0, h);
        let viewport = Rect::new(0.0, scroll, 800.0, 600.0);
        let ratio = region.intersection_ratio(&viewport);
        prop_assert!((0.0..=1.0).contains(&ratio), "ratio {} out of range", ratio);
    }
}
