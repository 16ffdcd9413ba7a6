//! Tests for the workflow session.

use super::*;
use crate::{
    assist::KeywordClassifier,
    models::Urgency,
    store::{MemoryBlobStore, MemoryRecordStore},
};

fn session() -> SessionContext {
    SessionContext::new("tenant-1", "Ada Tenant", "ada@example.com")
}

fn fill(workflow: &mut RequestWorkflow) {
    workflow.update(DraftPatch {
        category: Some("plumbing".to_string()),
        description: Some("Kitchen faucet leaking for 2 days".to_string()),
        urgency: Some(Urgency::High),
        location: Some("Kitchen".to_string()),
        ..Default::default()
    });
}

fn walk_to(workflow: &mut RequestWorkflow, target: StepId) {
    while workflow.current_step() != target {
        workflow.advance().expect("step should pass");
    }
}

fn submitter() -> Submitter<MemoryRecordStore, MemoryBlobStore> {
    Submitter::new(MemoryRecordStore::new(), MemoryBlobStore::new())
}

#[test]
fn test_jump_and_return_gives_same_review() {
    let mut direct = RequestWorkflow::new(session(), None);
    fill(&mut direct);
    walk_to(&mut direct, StepId::Review);

    let mut edited = RequestWorkflow::new(session(), None);
    fill(&mut edited);
    walk_to(&mut edited, StepId::Review);
    edited.jump_to(StepId::Description).unwrap();
    edited.update(DraftPatch::description("Kitchen faucet leaking for 2 days"));
    assert_eq!(edited.return_to_review().unwrap(), StepId::Review);

    assert_eq!(direct.review(), edited.review());
}

#[test]
fn test_apply_classification_respects_tenant_choice() {
    let suggestion = Classification {
        category: "plumbing".to_string(),
        confidence: 0.9,
        matched: vec!["leak".to_string()],
    };

    let mut workflow = RequestWorkflow::new(session(), None);
    workflow.update(DraftPatch::category("electrical"));
    assert!(!workflow.apply_classification(&suggestion));
    assert_eq!(workflow.draft().category.as_deref(), Some("electrical"));

    let mut fresh = RequestWorkflow::new(session(), None);
    assert!(fresh.apply_classification(&suggestion));
    assert_eq!(fresh.draft().category.as_deref(), Some("plumbing"));
}

#[test]
fn test_apply_classification_ignores_weak_suggestion() {
    let weak = Classification {
        category: "hvac".to_string(),
        confidence: 0.3,
        matched: vec![],
    };
    let mut workflow = RequestWorkflow::new(session(), None);
    assert!(!workflow.apply_classification(&weak));
    assert!(workflow.draft().category.is_none());
}

#[tokio::test]
async fn test_suggest_category_from_description() {
    let mut workflow = RequestWorkflow::new(session(), None);
    workflow.update(DraftPatch::description("Toilet is clogged and the drain smells"));
    let found = workflow
        .suggest_category(&KeywordClassifier::new())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.category, "plumbing");
    assert_eq!(workflow.draft().category.as_deref(), Some("plumbing"));
}

#[tokio::test]
async fn test_submit_requires_submission_step() {
    let submitter = submitter();
    let mut workflow = RequestWorkflow::new(session(), None);
    fill(&mut workflow);
    walk_to(&mut workflow, StepId::Review);

    let err = workflow
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SubmitError::OutOfSequence {
            step: StepId::Review
        }
    ));
    assert_eq!(submitter.records().create_calls(), 0);
}

#[tokio::test]
async fn test_successful_submit_completes_and_discards() {
    let submitter = submitter();
    let mut workflow = RequestWorkflow::new(session(), Some("prop-3".to_string()));
    fill(&mut workflow);
    let handle = workflow
        .attach("sink.jpg", "image/jpeg", vec![1, 2, 3])
        .unwrap();
    walk_to(&mut workflow, StepId::Submission);

    let result = workflow
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap();
    assert!(!result.reused);
    assert_eq!(result.photo_urls.len(), 1);
    assert_eq!(result.request.details.property_id.as_deref(), Some("prop-3"));

    assert!(workflow.navigator().is_completed());
    assert!(workflow.draft().attachments.is_empty());
    assert!(workflow.draft().category.is_none());
    assert!(!workflow.form().previews().is_live(handle));
    assert!(workflow.last_error().is_none());

    // A completed workflow refuses another submission.
    let err = workflow
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::OutOfSequence { .. }));

    workflow.restart();
    assert_eq!(workflow.current_step(), StepId::Welcome);
    assert!(!workflow.navigator().is_completed());
}

#[tokio::test]
async fn test_failed_submit_keeps_draft_for_retry() {
    let submitter = submitter();
    submitter.records().set_fail_create(true);

    let mut workflow = RequestWorkflow::new(session(), None);
    fill(&mut workflow);
    walk_to(&mut workflow, StepId::Submission);

    let err = workflow
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(workflow.current_step(), StepId::Submission);
    assert_eq!(workflow.draft().category.as_deref(), Some("plumbing"));
    assert_eq!(workflow.last_error(), Some(err.user_message().as_str()));

    submitter.records().set_fail_create(false);
    let result = workflow
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap();
    assert_eq!(result.request.details.category, "plumbing");
    assert!(workflow.last_error().is_none());
}

#[test]
fn test_cancel_resets_everything() {
    let mut workflow = RequestWorkflow::new(session(), Some("prop-1".to_string()));
    fill(&mut workflow);
    let handle = workflow.attach("a.png", "image/png", vec![9]).unwrap();
    walk_to(&mut workflow, StepId::Media);

    workflow.cancel();
    assert_eq!(workflow.current_step(), StepId::Welcome);
    assert!(!workflow.form().previews().is_live(handle));
    assert_eq!(workflow.draft().property_id.as_deref(), Some("prop-1"));
    assert!(workflow.draft().description.is_empty());
}

#[tokio::test]
async fn test_retry_reuses_photos_already_stored() {
    let submitter = submitter();
    submitter.blobs().fail_uploads_ending_with("_1_b.jpg");

    let mut workflow = RequestWorkflow::new(session(), None);
    fill(&mut workflow);
    for name in ["a.jpg", "b.jpg", "c.jpg"] {
        workflow.attach(name, "image/jpeg", vec![1, 2, 3]).unwrap();
    }
    walk_to(&mut workflow, StepId::Submission);

    let err = workflow
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::Attachments { .. }));
    assert_eq!(submitter.blobs().paths().len(), 2);
    let stored: Vec<String> = workflow
        .pending_uploads()
        .iter()
        .map(|photo| photo.url.clone())
        .collect();
    assert_eq!(stored.len(), 2);

    submitter.blobs().clear_failures();
    let result = workflow
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap();

    // Only the photo that failed was written again.
    assert_eq!(submitter.blobs().paths().len(), 3);
    assert_eq!(result.photo_urls.len(), 3);
    assert_eq!(result.photo_urls[0], stored[0]);
    assert_eq!(result.photo_urls[2], stored[1]);
    assert!(result.photo_urls[1].ends_with("_1_b.jpg"));
    assert!(workflow.pending_uploads().is_empty());
}

#[tokio::test]
async fn test_removed_photo_is_not_reused() {
    let submitter = submitter();
    submitter.blobs().fail_uploads_ending_with("_1_b.jpg");

    let mut workflow = RequestWorkflow::new(session(), None);
    fill(&mut workflow);
    let first = workflow.attach("a.jpg", "image/jpeg", vec![1]).unwrap();
    workflow.attach("b.jpg", "image/jpeg", vec![2]).unwrap();
    walk_to(&mut workflow, StepId::Submission);

    workflow
        .submit(&submitter, &SubmitOptions::default())
        .await
        .unwrap_err();
    assert_eq!(workflow.pending_uploads().len(), 1);

    workflow.remove_attachment(first).unwrap();
    assert!(workflow.pending_uploads().is_empty());
}

#[tokio::test]
async fn test_cancel_leaves_same_state_as_restart() {
    let submitter = submitter();
    submitter.blobs().fail_uploads_ending_with("_1_b.jpg");

    let prepare = || {
        let mut workflow = RequestWorkflow::new(session(), Some("prop-1".to_string()));
        fill(&mut workflow);
        workflow.attach("a.jpg", "image/jpeg", vec![1]).unwrap();
        workflow.attach("b.jpg", "image/jpeg", vec![2]).unwrap();
        walk_to(&mut workflow, StepId::Submission);
        workflow
    };
    let mut cancelled = prepare();
    let mut restarted = prepare();
    for workflow in [&mut cancelled, &mut restarted] {
        workflow
            .submit(&submitter, &SubmitOptions::default())
            .await
            .unwrap_err();
        assert!(workflow.last_error().is_some());
        assert!(!workflow.pending_uploads().is_empty());
    }

    cancelled.cancel();
    restarted.restart();

    for workflow in [&cancelled, &restarted] {
        assert_eq!(workflow.current_step(), StepId::Welcome);
        assert!(workflow.last_error().is_none());
        assert!(workflow.pending_uploads().is_empty());
        assert!(workflow.draft().attachments.is_empty());
    }
    assert_eq!(cancelled.draft(), restarted.draft());
}

#[test]
fn test_return_to_review_refused_outside_edit() {
    let mut workflow = RequestWorkflow::new(session(), None);
    fill(&mut workflow);

    let err = workflow.return_to_review().unwrap_err();
    assert_eq!(
        err,
        NavigationError::JumpNotAllowed {
            from: StepId::Welcome
        }
    );
    assert_eq!(workflow.current_step(), StepId::Welcome);
}
