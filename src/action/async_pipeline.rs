//! Asynchronous action pipeline.

use crate::action::accessors::impl_pipeline_accessors;
use crate::action::lifecycle::{ContextSlot, Lifecycle};
use crate::config::ActionConfig;
use crate::core::{ActionError, ActionResult, ProcessingStage};
use crate::validation::{RuleSet, ValidationContext};
use async_trait::async_trait;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Asynchronous collaborator hooks driven by an [`AsyncActionPipeline`].
///
/// Same contract as [`Action`](crate::action::Action); every hook may
/// suspend. Stages still run strictly one after another.
#[async_trait]
pub trait AsyncAction: Send {
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    async fn pre_add_rules(&mut self, _context: &mut ValidationContext) -> Result<(), ActionError> {
        Ok(())
    }

    async fn add_rules(&mut self, _rules: &mut RuleSet) -> Result<(), ActionError> {
        Ok(())
    }

    async fn pre_validate_rules(
        &mut self,
        _context: &mut ValidationContext,
    ) -> Result<(), ActionError> {
        Ok(())
    }

    async fn pre_process_action(
        &mut self,
        _context: &mut ValidationContext,
    ) -> Result<(), ActionError> {
        Ok(())
    }

    async fn process_action(&mut self, _context: &mut ValidationContext) -> Result<(), ActionError> {
        Ok(())
    }

    async fn post_process_action(
        &mut self,
        _context: &mut ValidationContext,
    ) -> Result<(), ActionError> {
        Ok(())
    }

    async fn verify_action(
        &mut self,
        _context: &ValidationContext,
        result: ActionResult,
    ) -> ActionResult {
        result
    }
}

/// Drives an [`AsyncAction`] through the pipeline stages.
///
/// Construction, single execution, fault absorption and parent/child
/// composition match [`ActionPipeline`](crate::action::ActionPipeline).
///
/// `execute_with_cancellation` races every hook and every rule verification
/// against a [`CancellationToken`]. Cancellation returns
/// `ActionError::Cancelled` and is never absorbed; whatever `ProcessAction`
/// already committed is the caller's to roll back.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use rulegate::action::{AsyncAction, AsyncActionPipeline};
/// use rulegate::config::ActionConfig;
/// use rulegate::core::{ActionError, ActionResult};
/// use rulegate::rules::NotNullRule;
/// use rulegate::validation::{RuleSet, ValidationContext};
///
/// struct Notify {
///     address: Option<String>,
///     sent: bool,
/// }
///
/// #[async_trait]
/// impl AsyncAction for Notify {
///     async fn add_rules(&mut self, rules: &mut RuleSet) -> Result<(), ActionError> {
///         rules.add(NotNullRule::new("Address", "No address on file", self.address.clone())?);
///         Ok(())
///     }
///
///     async fn process_action(&mut self, _context: &mut ValidationContext) -> Result<(), ActionError> {
///         self.sent = true;
///         Ok(())
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), ActionError> {
/// let mut action = Notify { address: None, sent: false };
/// let mut pipeline = AsyncActionPipeline::new(ActionConfig::default());
///
/// assert_eq!(pipeline.execute(&mut action).await?, ActionResult::Fail);
/// assert!(!action.sent);
/// # Ok(())
/// # }
/// ```
pub struct AsyncActionPipeline<'p> {
    context: ContextSlot<'p>,
    lifecycle: Lifecycle,
}

impl AsyncActionPipeline<'static> {
    /// Root pipeline with a fresh validation context.
    pub fn new(config: ActionConfig) -> Self {
        Self::with_context(ValidationContext::default(), config)
    }

    /// Root pipeline over an existing context, which takes `config`.
    pub fn with_context(mut context: ValidationContext, config: ActionConfig) -> Self {
        context.set_config(config);
        Self {
            context: ContextSlot::Owned(context),
            lifecycle: Lifecycle::new(false),
        }
    }
}

impl<'p> AsyncActionPipeline<'p> {
    /// Child pipeline recording into `parent`, running with its configuration.
    pub fn child_of(parent: &'p mut ValidationContext) -> Self {
        Self {
            context: ContextSlot::Shared(parent),
            lifecycle: Lifecycle::new(true),
        }
    }

    pub async fn execute<A: AsyncAction + ?Sized>(
        &mut self,
        action: &mut A,
    ) -> Result<ActionResult, ActionError> {
        self.execute_with_cancellation(action, &CancellationToken::new())
            .await
    }

    /// Run every stage, stopping at the next suspension point once `cancel`
    /// fires.
    pub async fn execute_with_cancellation<A: AsyncAction + ?Sized>(
        &mut self,
        action: &mut A,
        cancel: &CancellationToken,
    ) -> Result<ActionResult, ActionError> {
        self.lifecycle.begin(action.name())?;
        match self.run(action, cancel).await {
            Ok(result) => Ok(result),
            Err(error) => self.lifecycle.settle(error, self.context.get_mut()),
        }
    }

    async fn run<A: AsyncAction + ?Sized>(
        &mut self,
        action: &mut A,
        cancel: &CancellationToken,
    ) -> Result<ActionResult, ActionError> {
        let lifecycle = &mut self.lifecycle;
        let context = self.context.get_mut();

        let stage = ProcessingStage::PreAddRules;
        lifecycle.enter(stage);
        until_cancelled(cancel, stage, action.pre_add_rules(context)).await?;

        let stage = ProcessingStage::AddRules;
        lifecycle.enter(stage);
        until_cancelled(cancel, stage, action.add_rules(context.rules_mut())).await?;

        let stage = ProcessingStage::PreValidateRules;
        lifecycle.enter(stage);
        until_cancelled(cancel, stage, action.pre_validate_rules(context)).await?;

        lifecycle.enter(ProcessingStage::ValidateRules);
        if !context.validate_rules_cancellable(cancel).await? {
            return Ok(lifecycle.reject(context));
        }

        let stage = ProcessingStage::PreProcessAction;
        lifecycle.enter(stage);
        until_cancelled(cancel, stage, action.pre_process_action(context)).await?;

        let stage = ProcessingStage::ProcessAction;
        lifecycle.enter(stage);
        until_cancelled(cancel, stage, action.process_action(context)).await?;

        let stage = ProcessingStage::PostProcessAction;
        lifecycle.enter(stage);
        until_cancelled(cancel, stage, action.post_process_action(context)).await?;

        let result = until_cancelled(cancel, stage, async {
            Ok(action.verify_action(context, ActionResult::Success).await)
        })
        .await?;
        Ok(lifecycle.finish(result))
    }
}

impl_pipeline_accessors!(AsyncActionPipeline);

/// Await `work` unless `cancel` fires first.
async fn until_cancelled<T, F>(
    cancel: &CancellationToken,
    stage: ProcessingStage,
    work: F,
) -> Result<T, ActionError>
where
    F: Future<Output = Result<T, ActionError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!(stage = %stage, "cancellation observed");
            Err(ActionError::Cancelled { stage })
        }
        outcome = work => outcome,
    }
}
