#![allow(dead_code)]

use tempfile::TempDir;
use wrench_core::{
    models::{DraftPatch, SessionContext, Urgency},
    store::{MemoryBlobStore, MemoryRecordStore},
    submit::Submitter,
    workflow::{RequestWorkflow, StepId},
    Desk, DeskBuilder,
};

pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

pub fn session() -> SessionContext {
    SessionContext::new("tenant-1", "Ada Tenant", "ada@example.com")
}

pub fn other_session() -> SessionContext {
    SessionContext::new("tenant-2", "Bo Tenant", "bo@example.com")
}

/// Patch that fills every required field.
pub fn complete_patch(category: &str, urgency: Urgency) -> DraftPatch {
    DraftPatch {
        category: Some(category.to_string()),
        description: Some("Kitchen faucet leaking for 2 days".to_string()),
        urgency: Some(urgency),
        location: Some("Kitchen".to_string()),
        ..Default::default()
    }
}

pub fn memory_submitter() -> Submitter<MemoryRecordStore, MemoryBlobStore> {
    Submitter::new(MemoryRecordStore::new(), MemoryBlobStore::new())
}

/// Advances until `target`, panicking if any step refuses.
pub fn walk_to(workflow: &mut RequestWorkflow, target: StepId) {
    while workflow.current_step() != target {
        workflow.advance().expect("step check should pass");
    }
}

/// A workflow for `session` with a complete draft, waiting on Submission.
pub fn ready_workflow(session: SessionContext, urgency: Urgency) -> RequestWorkflow {
    let mut workflow = RequestWorkflow::new(session, None);
    workflow.update(complete_patch("plumbing", urgency));
    walk_to(&mut workflow, StepId::Submission);
    workflow
}

/// Helper function to create a desk in a temporary directory
pub async fn create_test_desk() -> (TempDir, Desk) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let desk = DeskBuilder::new()
        .with_database_path(Some(temp_dir.path().join("requests.db")))
        .with_blob_dir(Some(temp_dir.path().join("blobs")))
        .build()
        .await
        .expect("Failed to create desk");
    (temp_dir, desk)
}
