//! State machine shared by the synchronous and asynchronous pipelines.

use crate::core::{
    ActionError, ActionFault, ActionResult, ProcessingStage, RuleExt, StageHistory,
    StageTransition,
};
use crate::report::ActionReport;
use crate::rules::FaultRule;
use crate::validation::ValidationContext;
use chrono::Utc;
use uuid::Uuid;

/// Where a pipeline's validation context lives.
///
/// A root action owns its context; a child action borrows its parent's so
/// that the whole tree records into one result set.
pub(crate) enum ContextSlot<'p> {
    Owned(ValidationContext),
    Shared(&'p mut ValidationContext),
}

impl ContextSlot<'_> {
    pub(crate) fn get(&self) -> &ValidationContext {
        match self {
            Self::Owned(context) => context,
            Self::Shared(context) => context,
        }
    }

    pub(crate) fn get_mut(&mut self) -> &mut ValidationContext {
        match self {
            Self::Owned(context) => context,
            Self::Shared(context) => context,
        }
    }

    pub(crate) fn into_owned(self) -> Option<ValidationContext> {
        match self {
            Self::Owned(context) => Some(context),
            Self::Shared(_) => None,
        }
    }
}

/// Stage, terminal result and history of one pipeline run.
pub(crate) struct Lifecycle {
    id: Uuid,
    action: String,
    stage: ProcessingStage,
    result: ActionResult,
    history: StageHistory,
    is_child: bool,
}

impl Lifecycle {
    pub(crate) fn new(is_child: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            action: String::new(),
            stage: ProcessingStage::NotStarted,
            result: ActionResult::Unknown,
            history: StageHistory::new(),
            is_child,
        }
    }

    pub(crate) fn id(&self) -> Uuid {
        self.id
    }

    pub(crate) fn action(&self) -> &str {
        &self.action
    }

    pub(crate) fn stage(&self) -> ProcessingStage {
        self.stage
    }

    pub(crate) fn result(&self) -> ActionResult {
        self.result
    }

    pub(crate) fn history(&self) -> &StageHistory {
        &self.history
    }

    pub(crate) fn is_child(&self) -> bool {
        self.is_child
    }

    /// Claim the single run this pipeline is allowed.
    pub(crate) fn begin(&mut self, action: &str) -> Result<(), ActionError> {
        if self.stage != ProcessingStage::NotStarted {
            return Err(ActionError::AlreadyExecuted {
                result: self.result,
            });
        }
        self.action = action.to_string();
        tracing::debug!(
            action = %self.action,
            id = %self.id,
            child = self.is_child,
            "executing action"
        );
        Ok(())
    }

    pub(crate) fn enter(&mut self, stage: ProcessingStage) {
        self.history = self.history.record(StageTransition {
            from: self.stage,
            to: stage,
            timestamp: Utc::now(),
        });
        self.stage = stage;
        tracing::debug!(action = %self.action, id = %self.id, stage = %stage, "entering stage");
    }

    /// Validation failed; nothing after `ValidateRules` runs.
    pub(crate) fn reject(&mut self, context: &ValidationContext) -> ActionResult {
        self.result = ActionResult::Fail;
        tracing::info!(
            action = %self.action,
            id = %self.id,
            failed = context.failed_results().len(),
            "validation failed; action stopped"
        );
        self.result
    }

    pub(crate) fn finish(&mut self, result: ActionResult) -> ActionResult {
        self.result = result;
        tracing::info!(action = %self.action, id = %self.id, result = %result, "action finished");
        result
    }

    /// Absorb a designated fault raised up through `ProcessAction`; return
    /// every other error unchanged.
    ///
    /// Disclosure follows the context's configuration.
    pub(crate) fn settle(
        &mut self,
        error: ActionError,
        context: &mut ValidationContext,
    ) -> Result<ActionResult, ActionError> {
        match error {
            ActionError::Fault(fault) if self.stage.intercepts_faults() => {
                self.absorb(fault, context);
                Ok(self.result)
            }
            other => Err(other),
        }
    }

    fn absorb(&mut self, fault: ActionFault, context: &mut ValidationContext) {
        let raised_in = self.stage;
        let surfaced = context.config().surfaces(&fault);
        let message = context.config().fault_message(&fault);
        self.enter(ProcessingStage::ExceptionHandler);

        match FaultRule::with_message(message, fault).and_then(|mut rule| rule.execute()) {
            Ok(result) => context.add_result(result),
            Err(error) => tracing::error!(%error, "could not record absorbed fault"),
        }
        self.result = ActionResult::Fail;

        tracing::warn!(
            action = %self.action,
            id = %self.id,
            stage = %raised_in,
            surfaced,
            "fault absorbed into a failed result"
        );
    }

    pub(crate) fn report(&self, context: &ValidationContext) -> ActionReport {
        ActionReport::new(
            self.id,
            self.action.clone(),
            self.result,
            self.stage,
            self.is_child,
            context.results().to_vec(),
            self.history.clone(),
        )
    }
}
