//! Step navigation over the static [`STEPS`] table.

use log::debug;
use thiserror::Error;

use super::steps::{StepId, STEPS};
use crate::{models::RequestDraft, validation::ValidationError};

/// A refused step transition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavigationError {
    /// The current step's check failed
    #[error("Cannot continue from {step}: {reason}")]
    Blocked {
        step: StepId,
        #[source]
        reason: ValidationError,
    },
    /// Going back is not allowed from this step
    #[error("Cannot go back from {step}")]
    NotReversible { step: StepId },
    /// Already on the first step
    #[error("Already at the first step")]
    AtStart,
    /// Already on the last step
    #[error("No step after {step}")]
    AtEnd { step: StepId },
    /// Jumps are only offered from the review step
    #[error("Sections can only be edited from the review step (currently on {from})")]
    JumpNotAllowed { from: StepId },
    /// The target step cannot be edited from review
    #[error("{target} cannot be edited from the review step")]
    NotEditable { target: StepId },
    /// The workflow has finished
    #[error("The request has already been submitted")]
    Completed,
    /// `complete()` called before reaching the submission step
    #[error("Cannot complete from {step}")]
    NotAtSubmission { step: StepId },
}

/// Tracks the current step of one composition session.
///
/// The navigator only ever moves forward past a step whose check passes, so
/// the submission step is unreachable with an incomplete draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepNavigator {
    index: usize,
    editing: bool,
    completed: bool,
}

impl StepNavigator {
    /// Starts at the welcome step.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> StepId {
        STEPS[self.index].id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// True after a jump from review until the navigator is back on review.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    fn ensure_active(&self) -> Result<(), NavigationError> {
        if self.completed {
            Err(NavigationError::Completed)
        } else {
            Ok(())
        }
    }

    fn move_to(&mut self, index: usize) -> StepId {
        let from = self.current();
        self.index = index;
        let to = self.current();
        if to == StepId::Review {
            self.editing = false;
        }
        debug!("Step {from} -> {to}");
        to
    }

    /// Moves to the next step if the current step's check passes.
    ///
    /// # Errors
    ///
    /// [`NavigationError::Blocked`] with the validator's reason when the
    /// check fails; the current step does not change.
    pub fn advance(&mut self, draft: &RequestDraft) -> Result<StepId, NavigationError> {
        self.ensure_active()?;
        let step = self.current();
        if self.index + 1 >= STEPS.len() {
            return Err(NavigationError::AtEnd { step });
        }
        if let Err(reason) = STEPS[self.index].can_proceed(draft) {
            debug!("Refused to leave {step}: {reason}");
            return Err(NavigationError::Blocked { step, reason });
        }
        Ok(self.move_to(self.index + 1))
    }

    /// Moves to the previous step.
    pub fn back(&mut self) -> Result<StepId, NavigationError> {
        self.ensure_active()?;
        let step = self.current();
        if self.index == 0 {
            return Err(NavigationError::AtStart);
        }
        if !STEPS[self.index].reversible {
            debug!("Refused to go back from {step}");
            return Err(NavigationError::NotReversible { step });
        }
        Ok(self.move_to(self.index - 1))
    }

    /// Jumps from review to an editable step and enters edit mode.
    pub fn jump_to(&mut self, target: StepId) -> Result<StepId, NavigationError> {
        self.ensure_active()?;
        let from = self.current();
        if from != StepId::Review {
            debug!("Refused jump to {target} from {from}");
            return Err(NavigationError::JumpNotAllowed { from });
        }
        if !target.descriptor().editable || target.index() >= self.index {
            return Err(NavigationError::NotEditable { target });
        }
        self.move_to(target.index());
        self.editing = true;
        Ok(target)
    }

    /// Goes back to review after an edit, re-checking every step in between.
    ///
    /// Stops on the first step whose check fails and reports it as
    /// [`NavigationError::Blocked`]. Calling this while already on review is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// [`NavigationError::JumpNotAllowed`] unless a jump from review started
    /// the current edit.
    pub fn return_to_review(&mut self, draft: &RequestDraft) -> Result<StepId, NavigationError> {
        self.ensure_active()?;
        let review = StepId::Review.index();
        if self.index > review {
            return Err(NavigationError::AtEnd {
                step: self.current(),
            });
        }
        if self.index == review {
            return Ok(StepId::Review);
        }
        if !self.editing {
            let from = self.current();
            debug!("Refused return to review from {from} outside an edit");
            return Err(NavigationError::JumpNotAllowed { from });
        }

        for (index, descriptor) in STEPS.iter().enumerate().take(review).skip(self.index) {
            if let Err(reason) = descriptor.can_proceed(draft) {
                let step = descriptor.id;
                if index != self.index {
                    self.move_to(index);
                }
                debug!("Returning to review blocked at {step}: {reason}");
                return Err(NavigationError::Blocked { step, reason });
            }
        }

        Ok(self.move_to(review))
    }

    /// Marks the workflow finished. Only valid on the submission step.
    pub fn complete(&mut self) -> Result<(), NavigationError> {
        self.ensure_active()?;
        let step = self.current();
        if step != StepId::Submission {
            return Err(NavigationError::NotAtSubmission { step });
        }
        self.completed = true;
        debug!("Workflow completed");
        Ok(())
    }

    /// Starts over at the welcome step.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
