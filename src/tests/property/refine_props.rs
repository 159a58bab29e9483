//! Property-based tests for client-side sorting
//!
//! Tests invariants:
//! - Sorting is a permutation of its input
//! - Price ascending output is non-decreasing
//! - Equal keys keep their incoming order

use proptest::prelude::*;

use crate::core::catalog::{sort_tours, SortOrder, Tour};
use crate::tests::common::fixtures::tour;

fn tours_strategy() -> impl Strategy<Value = Vec<Tour>> {
    proptest::collection::vec((0u32..5, 0u32..5), 0..30).prop_map(|keys| {
        keys.into_iter()
            .enumerate()
            .map(|(i, (price, rating))| {
                tour(&i.to_string(), "Tour", "Anywhere", f64::from(price) * 100.0, rating as f32)
            })
            .collect()
    })
}

fn position(id: &str) -> usize {
    id.parse().unwrap()
}

proptest! {
    #[test]
    fn prop_sort_is_permutation(mut tours in tours_strategy()) {
        let mut before: Vec<String> = tours.iter().map(|t| t.id.clone()).collect();
        sort_tours(&mut tours, SortOrder::RatingDesc);
        let mut after: Vec<String> = tours.iter().map(|t| t.id.clone()).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn prop_price_asc_is_ordered_and_stable(mut tours in tours_strategy()) {
        sort_tours(&mut tours, SortOrder::PriceAsc);
        for pair in tours.windows(2) {
            prop_assert!(pair[0].price <= pair[1].price);
            if pair[0].price == pair[1].price {
                prop_assert!(position(&pair[0].id) < position(&pair[1].id));
            }
        }
    }

    #[test]
    fn prop_rating_desc_is_ordered_and_stable(mut tours in tours_strategy()) {
        sort_tours(&mut tours, SortOrder::RatingDesc);
        for pair in tours.windows(2) {
            prop_assert!(pair[0].rating >= pair[1].rating);
            if pair[0].rating == pair[1].rating {
                prop_assert!(position(&pair[0].id) < position(&pair[1].id));
            }
        }
    }
}
