//! Property-based tests for the reconciliation planner
//!
//! Tests invariants:
//! - An unchanged collection plans to NoOp
//! - Moving one item plans to ReorderOnly with the displayed order
//! - One trailing new item plans to AppendOnly with only that item
//! - Any deletion plans to ReplaceAll in exact display order

use proptest::prelude::*;

use crate::core::gallery::{plan, PlanMode, ResourceSlot, UploadPlan};
use crate::tests::common::fixtures::{cdn, new_blob, pending};

fn original(len: usize) -> Vec<crate::core::gallery::RemoteUrl> {
    (0..len).map(|i| cdn(&format!("img{i}"))).collect()
}

fn as_slots(urls: &[crate::core::gallery::RemoteUrl]) -> Vec<ResourceSlot> {
    urls.iter().cloned().map(ResourceSlot::Existing).collect()
}

proptest! {
    #[test]
    fn prop_unchanged_is_noop(len in 1usize..10) {
        let original = original(len);
        let current = as_slots(&original);
        prop_assert_eq!(plan(&original, &current).unwrap(), UploadPlan::NoOp);
    }

    #[test]
    fn prop_single_move_is_reorder_only(len in 2usize..10, from_seed in 0usize..100, to_seed in 0usize..100) {
        let original = original(len);
        let from = from_seed % len;
        let to = to_seed % len;
        prop_assume!(from != to);

        let mut current = as_slots(&original);
        let moved = current.remove(from);
        current.insert(to, moved);

        let expected: Vec<_> = current.iter().filter_map(|s| s.remote_url().cloned()).collect();
        prop_assert_eq!(plan(&original, &current).unwrap(), UploadPlan::ReorderOnly { order: expected });
    }

    #[test]
    fn prop_trailing_append_is_append_only(len in 0usize..10) {
        let original = original(len);
        let mut current = as_slots(&original);
        current.push(pending("fresh"));

        match plan(&original, &current).unwrap() {
            UploadPlan::AppendOnly { items } => {
                prop_assert_eq!(items.len(), 1);
                prop_assert_eq!(&items[0], &new_blob("fresh"));
            }
            other => prop_assert!(false, "expected AppendOnly, got {:?}", other.mode()),
        }
    }

    #[test]
    fn prop_deletion_is_replace_all_in_display_order(
        len in 2usize..10,
        drop_mask in proptest::collection::vec(any::<bool>(), 10),
        extra in 0usize..3,
    ) {
        let original = original(len);
        let mut current: Vec<ResourceSlot> = original
            .iter()
            .zip(drop_mask.iter())
            .filter(|(_, drop)| !**drop)
            .map(|(url, _)| ResourceSlot::Existing(url.clone()))
            .collect();
        prop_assume!(current.len() < len);
        for i in 0..extra {
            current.push(pending(&format!("new{i}")));
        }
        prop_assume!(!current.is_empty());

        let result = plan(&original, &current).unwrap();
        prop_assert_eq!(result.mode(), PlanMode::ReplaceAll);
        prop_assert_eq!(result, UploadPlan::ReplaceAll { items: current });
    }
}
