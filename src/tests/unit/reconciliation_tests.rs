//! Reconciliation Scenario Tests
//!
//! Planner, materializer and edit session together, with a mocked
//! resource backend:
//! - delete + append becomes one replace in display order
//! - a failed re-fetch uploads nothing and keeps the edit
//! - a confirmed commit replaces the snapshot

use std::sync::Arc;

use bytes::Bytes;

use crate::core::backend::{FetchedBlob, MockResourceBackend};
use crate::core::error::TourdeskError;
use crate::core::gallery::{
    plan, EditSession, Materializer, OriginalSnapshot, PlanMode, RemoteUrl, UploadPlan,
};
use crate::tests::common::fixtures::{cdn, cdn_all, existing, new_blob, pending};

fn open(names: &[&str]) -> EditSession {
    EditSession::open("tour-42", OriginalSnapshot::new(cdn_all(names)))
}

#[test]
fn test_delete_middle_and_append_plans_replace_all() {
    let original = cdn_all(&["a", "b", "c"]);
    let current = vec![existing("a"), existing("c"), pending("d")];
    assert_eq!(
        plan(&original, &current).unwrap(),
        UploadPlan::ReplaceAll {
            items: current.clone()
        }
    );
}

#[tokio::test]
async fn test_delete_and_append_materializes_fetch_a_fetch_c_d() {
    let mut backend = MockResourceBackend::new();
    backend.expect_fetch_bytes().times(2).returning(|url| {
        let body = if *url == cdn("a") { "bytes-a" } else { "bytes-c" };
        Ok(FetchedBlob {
            bytes: Bytes::from(body),
            content_type: Some("image/jpeg".to_string()),
        })
    });
    backend
        .expect_upload_resources()
        .withf(|owner, items, replace| {
            let bodies: Vec<&[u8]> = items.iter().map(|b| b.bytes.as_ref()).collect();
            owner == "tour-42"
                && *replace
                && bodies == vec![&b"bytes-a"[..], &b"bytes-c"[..], &b"d"[..]]
        })
        .times(1)
        .returning(|_, _, _| Ok(cdn_all(&["a2", "c2", "d2"])));

    let mut session = open(&["a", "b", "c"]);
    session.remove(1).unwrap();
    session.append(new_blob("d"));

    let materializer = Materializer::new(Arc::new(backend));
    let committed = session.commit(&materializer).await.unwrap();

    assert_eq!(committed.mode(), PlanMode::ReplaceAll);
    assert_eq!(session.original().as_slice(), cdn_all(&["a2", "c2", "d2"]).as_slice());
    assert!(!session.is_dirty());
}

#[tokio::test]
async fn test_failed_refetch_keeps_edit_state() {
    let mut backend = MockResourceBackend::new();
    backend
        .expect_fetch_bytes()
        .returning(|url| Err(TourdeskError::materialization(url.as_str(), "connection reset")));
    backend.expect_upload_resources().never();

    let mut session = open(&["a", "b"]);
    session.remove(0).unwrap();
    session.append(new_blob("n"));
    let edited = session.slots().to_vec();

    let materializer = Materializer::new(Arc::new(backend));
    let err = session.commit(&materializer).await.unwrap_err();

    assert!(matches!(err, TourdeskError::Materialization { .. }));
    assert_eq!(session.slots(), edited.as_slice());
    assert_eq!(session.original().as_slice(), cdn_all(&["a", "b"]).as_slice());
}

#[tokio::test]
async fn test_conflict_on_append_keeps_edit_state() {
    let mut backend = MockResourceBackend::new();
    backend
        .expect_upload_resources()
        .times(1)
        .returning(|_, _, _| Err(TourdeskError::Conflict("tour was modified".into())));

    let mut session = open(&["a"]);
    session.append(new_blob("n"));

    let materializer = Materializer::new(Arc::new(backend));
    let err = session.commit(&materializer).await.unwrap_err();
    assert!(matches!(err, TourdeskError::Conflict(_)));
    assert_eq!(session.slots().len(), 2);
    assert!(session.is_dirty());
}

#[tokio::test]
async fn test_reorder_commit_updates_snapshot_without_upload() {
    let mut backend = MockResourceBackend::new();
    backend
        .expect_update_order()
        .times(1)
        .returning(|_, order| Ok(order.to_vec()));
    backend.expect_upload_resources().never();
    backend.expect_fetch_bytes().never();

    let mut session = open(&["a", "b", "c"]);
    session.promote_to_cover(2).unwrap();

    let materializer = Materializer::new(Arc::new(backend));
    session.commit(&materializer).await.unwrap();
    assert_eq!(session.original().as_slice(), cdn_all(&["c", "a", "b"]).as_slice());
}

#[tokio::test]
async fn test_validation_rejected_before_any_call() {
    let backend = MockResourceBackend::new();
    let mut session = open(&["a"]);
    session.remove(0).unwrap();

    let materializer = Materializer::new(Arc::new(backend));
    let err = session.commit(&materializer).await.unwrap_err();
    assert!(matches!(err, TourdeskError::Validation(_)));
}

#[test]
fn test_replaying_append_plan_is_not_idempotent() {
    // The append primitive is not idempotent; a replayed plan would append
    // again. The session guards against this by re-planning from the new
    // snapshot after every confirmed commit.
    let mut session = open(&["a"]);
    session.append(new_blob("n"));
    assert_eq!(session.plan().unwrap().mode(), PlanMode::AppendOnly);

    let confirmed: Vec<RemoteUrl> = cdn_all(&["a", "n"]);
    let reopened = EditSession::open("tour-42", OriginalSnapshot::new(confirmed));
    assert_eq!(reopened.plan().unwrap(), UploadPlan::NoOp);
}
