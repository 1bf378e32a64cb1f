//! Synchronous action pipeline.

use crate::action::accessors::impl_pipeline_accessors;
use crate::action::lifecycle::{ContextSlot, Lifecycle};
use crate::config::ActionConfig;
use crate::core::{ActionError, ActionResult, ProcessingStage};
use crate::validation::{RuleSet, ValidationContext};

/// Collaborator hooks driven by an [`ActionPipeline`].
///
/// Every hook is optional. Returning `ActionError::Fault` from any hook up
/// through `process_action` records a failed result instead of failing the
/// call; any other error propagates.
pub trait Action {
    /// Name used in logs and reports.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn pre_add_rules(&mut self, _context: &mut ValidationContext) -> Result<(), ActionError> {
        Ok(())
    }

    /// Register the rules this action must satisfy.
    ///
    /// For a child action `rules` belongs to the parent's context.
    fn add_rules(&mut self, _rules: &mut RuleSet) -> Result<(), ActionError> {
        Ok(())
    }

    /// Last chance to adjust pending rules before validation.
    fn pre_validate_rules(&mut self, _context: &mut ValidationContext) -> Result<(), ActionError> {
        Ok(())
    }

    fn pre_process_action(&mut self, _context: &mut ValidationContext) -> Result<(), ActionError> {
        Ok(())
    }

    /// The unit of work itself.
    fn process_action(&mut self, _context: &mut ValidationContext) -> Result<(), ActionError> {
        Ok(())
    }

    fn post_process_action(&mut self, _context: &mut ValidationContext) -> Result<(), ActionError> {
        Ok(())
    }

    /// Compute the terminal result; `result` is the nominal `Success`.
    fn verify_action(&mut self, _context: &ValidationContext, result: ActionResult) -> ActionResult {
        result
    }
}

/// Drives an [`Action`] through the pipeline stages.
///
/// A pipeline runs once. A root pipeline owns its validation context; a
/// child pipeline built with [`ActionPipeline::child_of`] records into its
/// parent's context, so one result set covers the whole action tree.
///
/// # Example
///
/// ```rust
/// use rulegate::action::{Action, ActionPipeline};
/// use rulegate::config::ActionConfig;
/// use rulegate::core::{ActionError, ActionResult};
/// use rulegate::rules::RangeRule;
/// use rulegate::validation::{RuleSet, ValidationContext};
///
/// struct Withdraw {
///     amount: u64,
///     balance: u64,
/// }
///
/// impl Action for Withdraw {
///     fn add_rules(&mut self, rules: &mut RuleSet) -> Result<(), ActionError> {
///         rules.add(RangeRule::new("Amount", "Insufficient funds", self.amount, 1, self.balance)?);
///         Ok(())
///     }
///
///     fn process_action(&mut self, _context: &mut ValidationContext) -> Result<(), ActionError> {
///         self.balance -= self.amount;
///         Ok(())
///     }
/// }
///
/// let mut action = Withdraw { amount: 30, balance: 100 };
/// let mut pipeline = ActionPipeline::new(ActionConfig::default());
///
/// assert_eq!(pipeline.execute(&mut action)?, ActionResult::Success);
/// assert_eq!(action.balance, 70);
/// # Ok::<(), ActionError>(())
/// ```
pub struct ActionPipeline<'p> {
    context: ContextSlot<'p>,
    lifecycle: Lifecycle,
}

impl ActionPipeline<'static> {
    /// Root pipeline with a fresh validation context.
    pub fn new(config: ActionConfig) -> Self {
        Self::with_context(ValidationContext::default(), config)
    }

    /// Root pipeline over an existing context.
    ///
    /// `config` replaces the context's configuration; the context's
    /// configuration is the one the pipeline runs with.
    pub fn with_context(mut context: ValidationContext, config: ActionConfig) -> Self {
        context.set_config(config);
        Self {
            context: ContextSlot::Owned(context),
            lifecycle: Lifecycle::new(false),
        }
    }
}

impl<'p> ActionPipeline<'p> {
    /// Child pipeline recording into `parent`, running with its configuration.
    ///
    /// Only one pipeline may drive a shared context at a time; the borrow
    /// makes the parent's pipeline unusable until the child is dropped.
    pub fn child_of(parent: &'p mut ValidationContext) -> Self {
        Self {
            context: ContextSlot::Shared(parent),
            lifecycle: Lifecycle::new(true),
        }
    }

    /// Run every stage against `action`.
    ///
    /// Returns the terminal result, including `Fail` after an absorbed
    /// fault. Errors are the faults the pipeline does not absorb; the stage
    /// then stays where the error was raised and no result is finalized.
    pub fn execute<A: Action + ?Sized>(&mut self, action: &mut A) -> Result<ActionResult, ActionError> {
        self.lifecycle.begin(action.name())?;
        match self.run(action) {
            Ok(result) => Ok(result),
            Err(error) => self.lifecycle.settle(error, self.context.get_mut()),
        }
    }

    fn run<A: Action + ?Sized>(&mut self, action: &mut A) -> Result<ActionResult, ActionError> {
        let lifecycle = &mut self.lifecycle;
        let context = self.context.get_mut();

        lifecycle.enter(ProcessingStage::PreAddRules);
        action.pre_add_rules(context)?;

        lifecycle.enter(ProcessingStage::AddRules);
        action.add_rules(context.rules_mut())?;

        lifecycle.enter(ProcessingStage::PreValidateRules);
        action.pre_validate_rules(context)?;

        lifecycle.enter(ProcessingStage::ValidateRules);
        if !context.validate_rules()? {
            return Ok(lifecycle.reject(context));
        }

        lifecycle.enter(ProcessingStage::PreProcessAction);
        action.pre_process_action(context)?;

        lifecycle.enter(ProcessingStage::ProcessAction);
        action.process_action(context)?;

        lifecycle.enter(ProcessingStage::PostProcessAction);
        action.post_process_action(context)?;

        let result = action.verify_action(context, ActionResult::Success);
        Ok(lifecycle.finish(result))
    }
}

impl_pipeline_accessors!(ActionPipeline);
