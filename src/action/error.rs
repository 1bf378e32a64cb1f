//! Build errors for closure-bound actions.

use crate::core::ProcessingStage;
use thiserror::Error;

/// Errors that can occur when building an [`FnAction`](crate::action::FnAction).
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Action name not specified. Pass a non-empty name to ActionBuilder::new")]
    MissingName,

    #[error("No hooks bound. Bind at least one stage, rules or verify closure")]
    NoHooks,

    #[error("AddRules receives the rule list. Call .rules(closure) instead of .on(AddRules, ..)")]
    UseRulesForAddRules,

    #[error("Stage {stage} does not accept hooks")]
    UnbindableStage { stage: ProcessingStage },
}
