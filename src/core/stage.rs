//! Pipeline stages and terminal action results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of the action pipeline.
///
/// Stages are entered strictly in declaration order, except that
/// `ExceptionHandler` may be entered from any stage up through
/// `ProcessAction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProcessingStage {
    NotStarted,
    PreAddRules,
    AddRules,
    PreValidateRules,
    ValidateRules,
    PreProcessAction,
    ProcessAction,
    PostProcessAction,
    ExceptionHandler,
}

impl ProcessingStage {
    /// Stage name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NotStarted => "NotStarted",
            Self::PreAddRules => "PreAddRules",
            Self::AddRules => "AddRules",
            Self::PreValidateRules => "PreValidateRules",
            Self::ValidateRules => "ValidateRules",
            Self::PreProcessAction => "PreProcessAction",
            Self::ProcessAction => "ProcessAction",
            Self::PostProcessAction => "PostProcessAction",
            Self::ExceptionHandler => "ExceptionHandler",
        }
    }

    /// Whether a designated fault raised in this stage is absorbed.
    pub fn intercepts_faults(&self) -> bool {
        matches!(
            self,
            Self::PreAddRules
                | Self::AddRules
                | Self::PreValidateRules
                | Self::ValidateRules
                | Self::PreProcessAction
                | Self::ProcessAction
        )
    }

    /// Whether collaborator hooks can be bound to this stage.
    pub fn accepts_hooks(&self) -> bool {
        !matches!(
            self,
            Self::NotStarted | Self::ValidateRules | Self::ExceptionHandler
        )
    }
}

impl fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Terminal outcome of an action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionResult {
    #[default]
    Unknown,
    Success,
    Fail,
}

impl ActionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for ActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unknown => "Unknown",
            Self::Success => "Success",
            Self::Fail => "Fail",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_ordered_by_pipeline_position() {
        assert!(ProcessingStage::NotStarted < ProcessingStage::PreAddRules);
        assert!(ProcessingStage::AddRules < ProcessingStage::ValidateRules);
        assert!(ProcessingStage::ProcessAction < ProcessingStage::PostProcessAction);
    }

    #[test]
    fn faults_are_intercepted_only_through_process_action() {
        assert!(ProcessingStage::PreAddRules.intercepts_faults());
        assert!(ProcessingStage::ValidateRules.intercepts_faults());
        assert!(ProcessingStage::ProcessAction.intercepts_faults());
        assert!(!ProcessingStage::PostProcessAction.intercepts_faults());
        assert!(!ProcessingStage::NotStarted.intercepts_faults());
    }

    #[test]
    fn hooks_cannot_bind_to_engine_owned_stages() {
        assert!(ProcessingStage::ProcessAction.accepts_hooks());
        assert!(ProcessingStage::AddRules.accepts_hooks());
        assert!(!ProcessingStage::ValidateRules.accepts_hooks());
        assert!(!ProcessingStage::ExceptionHandler.accepts_hooks());
    }

    #[test]
    fn display_uses_stage_name() {
        assert_eq!(ProcessingStage::PreValidateRules.to_string(), "PreValidateRules");
        assert_eq!(ActionResult::Fail.to_string(), "Fail");
    }

    #[test]
    fn action_result_defaults_to_unknown() {
        assert_eq!(ActionResult::default(), ActionResult::Unknown);
        assert!(!ActionResult::default().is_success());
    }

    #[test]
    fn stage_serializes_correctly() {
        let stage = ProcessingStage::ProcessAction;
        let json = serde_json::to_string(&stage).unwrap();
        let deserialized: ProcessingStage = serde_json::from_str(&json).unwrap();
        assert_eq!(stage, deserialized);
    }
}
