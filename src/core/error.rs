//! Crate-wide error type.

use super::fault::ActionFault;
use super::stage::{ActionResult, ProcessingStage};
use thiserror::Error;

/// Boxed error used for faults the pipeline does not absorb.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by rules, hooks and pipelines.
///
/// Only [`ActionError::Fault`] is intercepted by a pipeline and turned into a
/// failed rule result. Every other variant propagates to the caller unchanged.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The designated fault type.
    #[error(transparent)]
    Fault(#[from] ActionFault),

    /// A rule was executed a second time.
    #[error("Rule '{name}' has already been processed")]
    Reentrancy { name: String },

    /// A rule, result or configuration was constructed with bad input.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Action has already been executed (result: {result})")]
    AlreadyExecuted { result: ActionResult },

    #[error("Action cancelled during stage {stage}")]
    Cancelled { stage: ProcessingStage },

    /// Any other failure raised by collaborator code.
    #[error(transparent)]
    Unhandled(BoxError),
}

impl ActionError {
    /// Wrap an arbitrary error as an unhandled fault.
    pub fn unhandled<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Unhandled(error.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Whether this is the designated fault a pipeline absorbs.
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }
}
