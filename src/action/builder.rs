//! Builder for actions expressed as closures bound to stages.

use crate::action::async_pipeline::AsyncAction;
use crate::action::error::BuildError;
use crate::action::pipeline::Action;
use crate::core::{ActionError, ActionResult, ProcessingStage};
use crate::validation::{RuleSet, ValidationContext};
use async_trait::async_trait;

type StageFn = Box<dyn FnMut(&mut ValidationContext) -> Result<(), ActionError> + Send>;
type RulesFn = Box<dyn FnMut(&mut RuleSet) -> Result<(), ActionError> + Send>;
type VerifyFn = Box<dyn FnMut(&ValidationContext, ActionResult) -> ActionResult + Send>;

/// A closure bound to one pipeline stage.
struct StageHook {
    stage: ProcessingStage,
    hook: StageFn,
}

/// Builder for [`FnAction`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use rulegate::action::{ActionBuilder, ActionPipeline};
/// use rulegate::config::ActionConfig;
/// use rulegate::core::{ActionResult, ProcessingStage};
/// use rulegate::rules::EqualityRule;
///
/// let mut action = ActionBuilder::new("CloseTicket")
///     .rules(|rules| {
///         rules.add(EqualityRule::equal("Status", "Ticket is not resolved", "resolved", "resolved")?);
///         Ok(())
///     })
///     .on(ProcessingStage::ProcessAction, |_context| Ok(()))?
///     .build()?;
///
/// let mut pipeline = ActionPipeline::new(ActionConfig::default());
/// assert_eq!(pipeline.execute(&mut action)?, ActionResult::Success);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ActionBuilder {
    name: String,
    hooks: Vec<StageHook>,
    rules: Option<RulesFn>,
    verify: Option<VerifyFn>,
}

impl ActionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hooks: Vec::new(),
            rules: None,
            verify: None,
        }
    }

    /// Bind `hook` to `stage`.
    ///
    /// Several hooks may share a stage; they run in the order they were bound.
    /// Returns an error for stages that cannot carry a hook.
    pub fn on<F>(mut self, stage: ProcessingStage, hook: F) -> Result<Self, BuildError>
    where
        F: FnMut(&mut ValidationContext) -> Result<(), ActionError> + Send + 'static,
    {
        if stage == ProcessingStage::AddRules {
            return Err(BuildError::UseRulesForAddRules);
        }
        if !stage.accepts_hooks() {
            return Err(BuildError::UnbindableStage { stage });
        }
        self.hooks.push(StageHook {
            stage,
            hook: Box::new(hook),
        });
        Ok(self)
    }

    /// Set the `AddRules` closure.
    pub fn rules<F>(mut self, add_rules: F) -> Self
    where
        F: FnMut(&mut RuleSet) -> Result<(), ActionError> + Send + 'static,
    {
        self.rules = Some(Box::new(add_rules));
        self
    }

    /// Set the closure that computes the terminal result.
    pub fn verify<F>(mut self, verify: F) -> Self
    where
        F: FnMut(&ValidationContext, ActionResult) -> ActionResult + Send + 'static,
    {
        self.verify = Some(Box::new(verify));
        self
    }

    pub fn build(self) -> Result<FnAction, BuildError> {
        if self.name.trim().is_empty() {
            return Err(BuildError::MissingName);
        }
        if self.hooks.is_empty() && self.rules.is_none() && self.verify.is_none() {
            return Err(BuildError::NoHooks);
        }

        let mut hooks = self.hooks;
        // Stable: hooks on the same stage keep their binding order.
        hooks.sort_by_key(|h| h.stage);

        Ok(FnAction {
            name: self.name,
            hooks,
            rules: self.rules,
            verify: self.verify,
        })
    }
}

/// An action whose hooks are closures, kept as an ordered stage list.
///
/// Runs on both [`ActionPipeline`](crate::action::ActionPipeline) and
/// [`AsyncActionPipeline`](crate::action::AsyncActionPipeline).
pub struct FnAction {
    name: String,
    hooks: Vec<StageHook>,
    rules: Option<RulesFn>,
    verify: Option<VerifyFn>,
}

impl FnAction {
    /// Stages with a bound hook, in pipeline order.
    pub fn stages(&self) -> Vec<ProcessingStage> {
        let mut stages: Vec<ProcessingStage> = self.hooks.iter().map(|h| h.stage).collect();
        if self.rules.is_some() {
            stages.push(ProcessingStage::AddRules);
        }
        stages.sort();
        stages.dedup();
        stages
    }

    fn run_stage(
        &mut self,
        stage: ProcessingStage,
        context: &mut ValidationContext,
    ) -> Result<(), ActionError> {
        for hook in self.hooks.iter_mut().filter(|h| h.stage == stage) {
            (hook.hook)(context)?;
        }
        Ok(())
    }

    fn run_rules(&mut self, rules: &mut RuleSet) -> Result<(), ActionError> {
        match self.rules.as_mut() {
            Some(add_rules) => add_rules(rules),
            None => Ok(()),
        }
    }

    fn run_verify(&mut self, context: &ValidationContext, result: ActionResult) -> ActionResult {
        match self.verify.as_mut() {
            Some(verify) => verify(context, result),
            None => result,
        }
    }
}

impl Action for FnAction {
    fn name(&self) -> &str {
        &self.name
    }

    fn pre_add_rules(&mut self, context: &mut ValidationContext) -> Result<(), ActionError> {
        self.run_stage(ProcessingStage::PreAddRules, context)
    }

    fn add_rules(&mut self, rules: &mut RuleSet) -> Result<(), ActionError> {
        self.run_rules(rules)
    }

    fn pre_validate_rules(&mut self, context: &mut ValidationContext) -> Result<(), ActionError> {
        self.run_stage(ProcessingStage::PreValidateRules, context)
    }

    fn pre_process_action(&mut self, context: &mut ValidationContext) -> Result<(), ActionError> {
        self.run_stage(ProcessingStage::PreProcessAction, context)
    }

    fn process_action(&mut self, context: &mut ValidationContext) -> Result<(), ActionError> {
        self.run_stage(ProcessingStage::ProcessAction, context)
    }

    fn post_process_action(&mut self, context: &mut ValidationContext) -> Result<(), ActionError> {
        self.run_stage(ProcessingStage::PostProcessAction, context)
    }

    fn verify_action(&mut self, context: &ValidationContext, result: ActionResult) -> ActionResult {
        self.run_verify(context, result)
    }
}

#[async_trait]
impl AsyncAction for FnAction {
    fn name(&self) -> &str {
        &self.name
    }

    async fn pre_add_rules(&mut self, context: &mut ValidationContext) -> Result<(), ActionError> {
        self.run_stage(ProcessingStage::PreAddRules, context)
    }

    async fn add_rules(&mut self, rules: &mut RuleSet) -> Result<(), ActionError> {
        self.run_rules(rules)
    }

    async fn pre_validate_rules(
        &mut self,
        context: &mut ValidationContext,
    ) -> Result<(), ActionError> {
        self.run_stage(ProcessingStage::PreValidateRules, context)
    }

    async fn pre_process_action(
        &mut self,
        context: &mut ValidationContext,
    ) -> Result<(), ActionError> {
        self.run_stage(ProcessingStage::PreProcessAction, context)
    }

    async fn process_action(&mut self, context: &mut ValidationContext) -> Result<(), ActionError> {
        self.run_stage(ProcessingStage::ProcessAction, context)
    }

    async fn post_process_action(
        &mut self,
        context: &mut ValidationContext,
    ) -> Result<(), ActionError> {
        self.run_stage(ProcessingStage::PostProcessAction, context)
    }

    async fn verify_action(
        &mut self,
        context: &ValidationContext,
        result: ActionResult,
    ) -> ActionResult {
        self.run_verify(context, result)
    }
}
