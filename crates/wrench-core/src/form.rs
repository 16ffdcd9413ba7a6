//! Form state container for the request draft.
//!
//! [`FormState`] is the single owner of the draft during one composition
//! session. Every step reads it through [`FormState::get`] and writes through
//! [`FormState::update`] / [`FormState::update_with`], which merge against the
//! current draft so fields set by earlier steps are never dropped.
//!
//! Photos are added and removed through [`FormState::attach`] and
//! [`FormState::remove_attachment`]. Each accepted photo gets a
//! [`PreviewHandle`] from the form's [`PreviewRegistry`]; the handle is
//! revoked when the photo is removed, when the draft is discarded, or when
//! the form is dropped.

use std::collections::BTreeSet;

use log::{debug, trace};

use crate::{
    models::{Attachment, DraftPatch, PreviewHandle, RequestDraft},
    validation::{validate_attachment, validate_attachment_count, ValidationError},
};

/// Tracks preview handles created for locally attached files.
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    next: u64,
    live: BTreeSet<PreviewHandle>,
    revoked: usize,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new live handle.
    pub fn create(&mut self) -> PreviewHandle {
        self.next += 1;
        let handle = PreviewHandle(self.next);
        self.live.insert(handle);
        trace!("Created {handle}");
        handle
    }

    /// Revokes a handle. Returns false if it was not live.
    pub fn revoke(&mut self, handle: PreviewHandle) -> bool {
        let removed = self.live.remove(&handle);
        if removed {
            self.revoked += 1;
            trace!("Revoked {handle}");
        }
        removed
    }

    /// Revokes every live handle and returns how many were released.
    pub fn revoke_all(&mut self) -> usize {
        let count = self.live.len();
        self.revoked += count;
        self.live.clear();
        count
    }

    pub fn is_live(&self, handle: PreviewHandle) -> bool {
        self.live.contains(&handle)
    }

    /// Number of handles currently live.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of handles revoked over the registry's lifetime.
    pub fn revoked_count(&self) -> usize {
        self.revoked
    }
}

/// Holds the accumulating draft for one composition session.
#[derive(Debug, Default)]
pub struct FormState {
    draft: RequestDraft,
    previews: PreviewRegistry,
}

impl FormState {
    /// Creates an empty form, optionally seeded with a property id.
    pub fn new(property_id: Option<String>) -> Self {
        Self {
            draft: RequestDraft::new(property_id),
            previews: PreviewRegistry::new(),
        }
    }

    /// Current draft.
    pub fn get(&self) -> &RequestDraft {
        &self.draft
    }

    /// Owned copy of the current draft.
    pub fn snapshot(&self) -> RequestDraft {
        self.draft.clone()
    }

    /// Merges `patch` into the current draft.
    pub fn update(&mut self, patch: DraftPatch) {
        if patch.is_empty() {
            return;
        }
        trace!("Merging draft patch: {patch:?}");
        self.draft.merge(patch);
    }

    /// Computes a patch from the current draft and merges it.
    ///
    /// Use this when the patch depends on what is already in the draft, so the
    /// decision is made against the latest state rather than a stale copy.
    pub fn update_with<F>(&mut self, f: F)
    where
        F: FnOnce(&RequestDraft) -> DraftPatch,
    {
        let patch = f(&self.draft);
        self.update(patch);
    }

    /// Validates and attaches a photo, returning the handle of its preview.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the file type or size is not
    /// accepted, or when the draft already holds the maximum number of
    /// photos. The draft is unchanged in that case.
    pub fn attach(
        &mut self,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<PreviewHandle, ValidationError> {
        let file_name = file_name.into();
        let content_type = content_type.into().trim().to_lowercase();

        validate_attachment_count(&self.draft.attachments)?;
        validate_attachment(&file_name, &content_type, bytes.len())?;

        let preview = self.previews.create();
        debug!("Attached {file_name} ({} bytes) as {preview}", bytes.len());
        self.draft.attachments.push(Attachment {
            preview,
            file_name,
            content_type,
            bytes,
        });
        Ok(preview)
    }

    /// Removes the photo owned by `handle` and revokes exactly that handle.
    pub fn remove_attachment(&mut self, handle: PreviewHandle) -> Option<Attachment> {
        let index = self
            .draft
            .attachments
            .iter()
            .position(|a| a.preview == handle)?;
        let removed = self.draft.attachments.remove(index);
        self.previews.revoke(handle);
        debug!("Removed {} ({handle})", removed.file_name);
        Some(removed)
    }

    /// Preview registry, for checking handle liveness.
    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    /// Drops the draft and releases every preview, leaving an empty form that
    /// keeps the original property id.
    pub fn discard(&mut self) {
        let released = self.previews.revoke_all();
        if released > 0 {
            debug!("Released {released} preview(s) on discard");
        }
        let property_id = self.draft.property_id.take();
        self.draft = RequestDraft::new(property_id);
    }
}

impl Drop for FormState {
    fn drop(&mut self) {
        let released = self.previews.revoke_all();
        if released > 0 {
            trace!("Released {released} preview(s) on drop");
        }
    }
}
