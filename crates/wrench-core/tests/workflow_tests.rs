mod common;

use common::{complete_patch, memory_submitter, ready_workflow, session, walk_to, JPEG};
use jiff::{SignedDuration, Timestamp};
use wrench_core::{
    models::{DraftPatch, Urgency},
    store::{MemoryBlobStore, MemoryRecordStore},
    submit::{SubmitConfig, SubmitError, SubmitOptions, Submitter},
    workflow::{NavigationError, RequestWorkflow, StepId},
};

#[tokio::test]
async fn test_plumbing_high_scenario() {
    let submitter = memory_submitter();
    let mut workflow = ready_workflow(session(), Urgency::High);

    let result = workflow
        .submit(&submitter, &SubmitOptions::default())
        .await
        .expect("submission should succeed");

    let details = &result.request.details;
    assert_eq!(details.category, "plumbing");
    assert_eq!(details.priority, Urgency::High);
    assert!(!details.is_emergency);
    assert_eq!(details.user_id, "tenant-1");
    assert_eq!(details.origin, "tenant-request-wizard");
    assert_eq!(result.estimate.response_window, "Within 24 hours");
    assert_eq!(result.estimate.team, "Plumbing Team");
    assert_eq!(submitter.records().len(), 1);
}

#[tokio::test]
async fn test_urgent_scenario_is_emergency() {
    let submitter = memory_submitter();
    let mut workflow = ready_workflow(session(), Urgency::Urgent);

    let result = workflow
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap();

    assert!(result.request.details.is_emergency);
    assert_eq!(result.request.details.priority, Urgency::Urgent);
    assert_eq!(result.estimate.response_window, "Within 4 hours");
}

#[test]
fn test_short_description_blocks_description_step() {
    let mut workflow = RequestWorkflow::new(session(), None);
    workflow.update(DraftPatch::category("plumbing"));
    workflow.update(DraftPatch::description("Leaks"));
    walk_to(&mut workflow, StepId::Description);

    let err = workflow.advance().unwrap_err();
    match err {
        NavigationError::Blocked { step, reason } => {
            assert_eq!(step, StepId::Description);
            assert_eq!(reason.field, "description");
            assert!(reason.reason.contains("at least 10 characters"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(workflow.current_step(), StepId::Description);
}

#[tokio::test]
async fn test_duplicate_within_window_creates_one_record() {
    let submitter = memory_submitter();

    let mut first = ready_workflow(session(), Urgency::Medium);
    first.attach("leak.jpg", "image/jpeg", JPEG.to_vec()).unwrap();
    let first_result = first
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap();
    assert!(!first_result.reused);
    let uploads_after_first = submitter.blobs().paths().len();
    assert_eq!(uploads_after_first, 1);

    let mut second = ready_workflow(session(), Urgency::Medium);
    second.attach("leak.jpg", "image/jpeg", JPEG.to_vec()).unwrap();
    let second_result = second
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap();

    assert!(second_result.reused);
    assert_eq!(second_result.id(), first_result.id());
    assert_eq!(second_result.photo_urls, first_result.photo_urls);
    assert_eq!(submitter.records().len(), 1);
    assert_eq!(submitter.records().create_calls(), 1);
    assert_eq!(submitter.blobs().paths().len(), uploads_after_first);
}

#[tokio::test]
async fn test_duplicate_guard_ignores_old_requests() {
    let submitter = memory_submitter();

    let mut first = ready_workflow(session(), Urgency::Low);
    let first_id = first
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap()
        .id();
    let old = Timestamp::now() - SignedDuration::from_mins(10);
    submitter.records().backdate(first_id, old).unwrap();

    let mut second = ready_workflow(session(), Urgency::Low);
    let second_result = second
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap();
    assert!(!second_result.reused);
    assert_ne!(second_result.id(), first_id);
    assert_eq!(submitter.records().len(), 2);
}

#[tokio::test]
async fn test_duplicate_guard_is_per_user() {
    let submitter = memory_submitter();

    ready_workflow(session(), Urgency::Low)
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap();
    let other = ready_workflow(common::other_session(), Urgency::Low)
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap();

    assert!(!other.reused);
    assert_eq!(submitter.records().len(), 2);
}

#[tokio::test]
async fn test_zero_window_disables_duplicate_guard() {
    let config = SubmitConfig {
        idempotency_window: SignedDuration::ZERO,
        ..SubmitConfig::default()
    };
    let submitter =
        Submitter::with_config(MemoryRecordStore::new(), MemoryBlobStore::new(), config);

    let first = ready_workflow(session(), Urgency::Low)
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap();
    let second = ready_workflow(session(), Urgency::Low)
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap();

    assert!(!second.reused);
    assert_ne!(first.id(), second.id());
    assert_eq!(submitter.records().query_calls(), 0);
    assert_eq!(submitter.records().len(), 2);
}

#[tokio::test]
async fn test_different_request_inside_window_is_created() {
    let submitter = memory_submitter();

    let first = ready_workflow(session(), Urgency::High)
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap();

    let mut other = RequestWorkflow::new(session(), None);
    other.update(DraftPatch {
        description: Some("Bedroom outlet sparks when used".to_string()),
        location: Some("Bedroom".to_string()),
        ..complete_patch("electrical", Urgency::Urgent)
    });
    walk_to(&mut other, StepId::Submission);
    let second = other
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap();

    assert!(!second.reused);
    assert_ne!(second.id(), first.id());
    assert_eq!(second.request.details.category, "electrical");
    assert_eq!(submitter.records().len(), 2);

    // Same content with a different urgency is a new request as well.
    let third = ready_workflow(session(), Urgency::Low)
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap();
    assert!(!third.reused);
    assert_eq!(submitter.records().len(), 3);
}

#[tokio::test]
async fn test_duplicate_lookup_failure_fails_open() {
    let submitter = memory_submitter();
    submitter.records().set_fail_query(true);

    let result = ready_workflow(session(), Urgency::High)
        .submit(&submitter, &SubmitOptions::default())
        .await
        .expect("lookup failure must not block submission");

    assert!(!result.reused);
    assert_eq!(submitter.records().query_calls(), 1);
    assert_eq!(submitter.records().len(), 1);
}

#[tokio::test]
async fn test_incomplete_draft_never_reaches_stores() {
    let submitter = memory_submitter();
    let mut draft_only = RequestWorkflow::new(session(), None);
    draft_only.update(DraftPatch::category("plumbing"));

    let err = submitter
        .submit(&session(), draft_only.draft(), &SubmitOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::Invalid(_)));
    assert_eq!(submitter.records().query_calls(), 0);
    assert_eq!(submitter.records().create_calls(), 0);
    assert!(submitter.blobs().paths().is_empty());
}

#[tokio::test]
async fn test_upload_failure_creates_nothing_by_default() {
    let submitter = memory_submitter();
    submitter.blobs().fail_uploads_ending_with("_1_b.jpg");

    let mut workflow = ready_workflow(session(), Urgency::Medium);
    workflow.attach("a.jpg", "image/jpeg", JPEG.to_vec()).unwrap();
    workflow.attach("b.jpg", "image/jpeg", JPEG.to_vec()).unwrap();
    workflow.attach("c.jpg", "image/jpeg", JPEG.to_vec()).unwrap();

    let err = workflow
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap_err();

    match &err {
        SubmitError::Attachments { failed, uploaded } => {
            assert_eq!(failed.len(), 1);
            assert_eq!(failed[0].file_name, "b.jpg");
            assert_eq!(uploaded.len(), 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.user_message(),
        "Could not attach photos. Retry or submit without them."
    );
    assert_eq!(submitter.records().create_calls(), 0);
    assert_eq!(workflow.current_step(), StepId::Submission);
    assert_eq!(workflow.draft().attachments.len(), 3);
    assert_eq!(
        workflow.last_error(),
        Some("Could not attach photos. Retry or submit without them.")
    );

    // Retry without the failed photo.
    let result = workflow
        .submit(&submitter, &SubmitOptions::skip_failed_photos())
        .await
        .unwrap();
    assert_eq!(result.photo_urls.len(), 2);
    assert_eq!(result.skipped, vec!["b.jpg".to_string()]);
    assert_eq!(result.request.details.photo_urls, result.photo_urls);
    assert_eq!(submitter.records().len(), 1);
}

#[tokio::test]
async fn test_uploads_run_concurrently_and_keep_order() {
    let submitter = memory_submitter();
    let mut workflow = ready_workflow(session(), Urgency::Low);
    for i in 0..5 {
        workflow
            .attach(format!("photo{i}.png"), "image/png", JPEG.to_vec())
            .unwrap();
    }

    let result = workflow
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap();

    assert_eq!(submitter.blobs().max_in_flight(), 5);
    assert_eq!(result.photo_urls.len(), 5);
    for (i, url) in result.photo_urls.iter().enumerate() {
        assert!(url.starts_with("memory://maintenance-photos/tenant-1/"));
        assert!(url.ends_with(&format!("_{i}_photo{i}.png")), "{url}");
    }
}

#[tokio::test]
async fn test_create_failure_is_retryable() {
    let submitter = memory_submitter();
    submitter.records().set_fail_create(true);

    let mut workflow = ready_workflow(session(), Urgency::High);
    let err = workflow
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::Create { .. }));
    assert!(err.is_retryable());
    assert!(!err.user_message().contains("Injected"));
    assert_eq!(workflow.current_step(), StepId::Submission);

    submitter.records().set_fail_create(false);
    let result = workflow
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap();
    assert_eq!(result.request.details.priority, Urgency::High);
}

#[tokio::test]
async fn test_jump_then_complete_matches_direct_path() {
    let direct_submitter = memory_submitter();
    let mut direct = ready_workflow(session(), Urgency::High);
    let direct_result = direct
        .submit(&direct_submitter, &SubmitOptions::default())
        .await
        .unwrap();

    let edited_submitter = memory_submitter();
    let mut edited = RequestWorkflow::new(session(), None);
    edited.update(complete_patch("electrical", Urgency::Low));
    walk_to(&mut edited, StepId::Review);
    edited.jump_to(StepId::Category).unwrap();
    edited.update(DraftPatch::category("plumbing"));
    edited.return_to_review().unwrap();
    edited.jump_to(StepId::Urgency).unwrap();
    edited.update(DraftPatch::urgency(Urgency::High));
    edited.advance().unwrap();
    edited.advance().unwrap();
    assert_eq!(edited.advance().unwrap(), StepId::Review);
    edited.advance().unwrap();

    let edited_result = edited
        .submit(&edited_submitter, &SubmitOptions::default())
        .await
        .unwrap();

    assert_eq!(direct_result.request.details, edited_result.request.details);
    assert_eq!(direct_result.estimate, edited_result.estimate);
}

#[test]
fn test_attach_then_remove_revokes_only_that_preview() {
    let mut workflow = RequestWorkflow::new(session(), None);
    let handles: Vec<_> = (0..3)
        .map(|i| {
            workflow
                .attach(format!("{i}.jpg"), "image/jpeg", JPEG.to_vec())
                .unwrap()
        })
        .collect();

    workflow.remove_attachment(handles[1]).unwrap();

    assert_eq!(workflow.draft().attachments.len(), 2);
    let previews = workflow.form().previews();
    assert!(previews.is_live(handles[0]));
    assert!(!previews.is_live(handles[1]));
    assert!(previews.is_live(handles[2]));
    assert_eq!(previews.revoked_count(), 1);
}
