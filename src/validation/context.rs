//! Validation context and the validation loop.

use crate::config::ActionConfig;
use crate::core::{ActionError, ProcessingStage, RuleExt, RuleResult};
use crate::validation::rule_set::RuleSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tokio_util::sync::CancellationToken;

/// Owner of a rule set and the results it produced.
///
/// `failed_results`, `passed_results` and `warnings` are pure filters over
/// `results`; `is_valid` is the conjunction of every recorded result and is
/// vacuously true when nothing has run.
pub struct ValidationContext {
    rules: RuleSet,
    results: Vec<RuleResult>,
    config: ActionConfig,
}

impl ValidationContext {
    pub fn new(config: ActionConfig) -> Self {
        Self {
            rules: RuleSet::new(),
            results: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &ActionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ActionConfig) {
        self.config = config;
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleSet {
        &mut self.rules
    }

    /// Results in execution order.
    pub fn results(&self) -> &[RuleResult] {
        &self.results
    }

    pub fn failed_results(&self) -> Vec<&RuleResult> {
        self.results.iter().filter(|r| !r.is_valid()).collect()
    }

    pub fn passed_results(&self) -> Vec<&RuleResult> {
        self.results.iter().filter(|r| r.is_valid()).collect()
    }

    pub fn warnings(&self) -> Vec<&RuleResult> {
        self.results.iter().filter(|r| r.is_warning()).collect()
    }

    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|r| r.is_valid())
    }

    /// Append a result that did not come from the rule set.
    pub fn add_result(&mut self, result: RuleResult) {
        self.results.push(result);
    }

    /// Run every pending rule in registration order.
    ///
    /// Returns the context's overall validity. A rule error propagates
    /// immediately; the failing rule stays processed and no result is
    /// recorded for it.
    pub fn validate_rules(&mut self) -> Result<bool, ActionError> {
        if self.halted() {
            return Ok(false);
        }
        while let Some(rule) = self.rules.next_pending() {
            let result = rule.execute()?;
            if self.record(result) {
                break;
            }
        }
        Ok(self.is_valid())
    }

    /// Asynchronous form of [`validate_rules`](Self::validate_rules).
    pub async fn validate_rules_async(&mut self) -> Result<bool, ActionError> {
        self.validate_rules_cancellable(&CancellationToken::new())
            .await
    }

    /// Asynchronous validation that stops with `ActionError::Cancelled` once
    /// `cancel` fires.
    ///
    /// A rule whose verification was interrupted stays processed and has no
    /// result.
    pub async fn validate_rules_cancellable(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<bool, ActionError> {
        if self.halted() {
            return Ok(false);
        }
        loop {
            if cancel.is_cancelled() {
                return Err(ActionError::Cancelled {
                    stage: ProcessingStage::ValidateRules,
                });
            }
            let Some(rule) = self.rules.next_pending() else {
                break;
            };
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(ActionError::Cancelled {
                        stage: ProcessingStage::ValidateRules,
                    });
                }
                result = rule.execute_async() => result?,
            };
            if self.record(result) {
                break;
            }
        }
        Ok(self.is_valid())
    }

    /// Export failed results as an accumulated `Validation`.
    pub fn to_validation(&self) -> Validation<(), NonEmptyVec<RuleResult>> {
        let checks: Vec<Validation<(), NonEmptyVec<RuleResult>>> = self
            .results
            .iter()
            .map(|result| {
                if result.is_valid() {
                    Validation::success(())
                } else {
                    Validation::fail(result.clone())
                }
            })
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }

    /// Append a rule's result; returns true when the loop must stop.
    fn record(&mut self, result: RuleResult) -> bool {
        let failed = !result.is_valid();
        tracing::debug!(
            rule = result.name(),
            valid = result.is_valid(),
            warning = result.is_warning(),
            "rule executed"
        );
        self.results.push(result);
        if failed && self.config.stop_on_first_failure {
            let skipped = self.rules.skip_pending();
            tracing::debug!(skipped, "short-circuit after first failed rule");
            return true;
        }
        false
    }

    /// With short-circuit on, a context that already failed runs nothing more.
    fn halted(&mut self) -> bool {
        if self.config.stop_on_first_failure && !self.is_valid() {
            let skipped = self.rules.skip_pending();
            if skipped > 0 {
                tracing::debug!(skipped, "context already failed; pending rules abandoned");
            }
            return true;
        }
        false
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new(ActionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActionFault, Rule, RuleHeader};
    use crate::rules::PredicateRule;
    use async_trait::async_trait;

    fn context(stop_on_first_failure: bool, outcomes: &[bool]) -> ValidationContext {
        let config = ActionConfig {
            stop_on_first_failure,
            ..ActionConfig::default()
        };
        let mut context = ValidationContext::new(config);
        for (index, outcome) in outcomes.iter().copied().enumerate() {
            let rule = PredicateRule::new(
                format!("Rule{index}"),
                format!("rule {index} failed"),
                move || outcome,
            )
            .unwrap();
            context.rules_mut().add(rule);
        }
        context
    }

    struct Faulting {
        header: RuleHeader,
    }

    impl Rule for Faulting {
        fn header(&self) -> &RuleHeader {
            &self.header
        }

        fn header_mut(&mut self) -> &mut RuleHeader {
            &mut self.header
        }

        fn verify(&mut self) -> Result<RuleResult, ActionError> {
            Err(ActionFault::new("lookup failed").into())
        }
    }

    struct Slow {
        header: RuleHeader,
    }

    #[async_trait]
    impl Rule for Slow {
        fn header(&self) -> &RuleHeader {
            &self.header
        }

        fn header_mut(&mut self) -> &mut RuleHeader {
            &mut self.header
        }

        fn verify(&mut self) -> Result<RuleResult, ActionError> {
            Ok(self.header.conclude(true))
        }

        async fn verify_async(&mut self) -> Result<RuleResult, ActionError> {
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
            Ok(self.header.conclude(true))
        }
    }

    #[test]
    fn empty_context_is_valid() {
        let mut context = ValidationContext::default();
        assert!(context.validate_rules().unwrap());
        assert!(context.results().is_empty());
    }

    #[test]
    fn short_circuit_stops_after_first_failure() {
        let mut context = context(true, &[true, false, false, true]);
        assert!(!context.validate_rules().unwrap());

        assert_eq!(context.results().len(), 2);
        assert_eq!(context.failed_results().len(), 1);
        let processed: Vec<bool> = context.rules().iter().map(|r| r.has_been_processed()).collect();
        assert_eq!(processed, vec![true, true, false, false]);
    }

    #[test]
    fn without_short_circuit_every_rule_runs() {
        let mut context = context(false, &[true, false, false, true]);
        assert!(!context.validate_rules().unwrap());

        assert_eq!(context.results().len(), 4);
        assert_eq!(context.failed_results().len(), 2);
        assert_eq!(context.passed_results().len(), 2);
    }

    #[test]
    fn results_follow_registration_order() {
        let mut context = context(false, &[true, true, true]);
        context.validate_rules().unwrap();

        let names: Vec<&str> = context.results().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Rule0", "Rule1", "Rule2"]);
    }

    #[test]
    fn second_pass_only_runs_new_rules() {
        let mut context = context(false, &[true]);
        context.validate_rules().unwrap();
        context
            .rules_mut()
            .add(PredicateRule::new("Later", "later failed", || false).unwrap());

        assert!(!context.validate_rules().unwrap());
        assert_eq!(context.results().len(), 2);
    }

    #[test]
    fn failed_context_with_short_circuit_abandons_new_rules() {
        let mut context = context(true, &[false]);
        context.validate_rules().unwrap();
        context
            .rules_mut()
            .add(PredicateRule::new("Later", "later", || true).unwrap());

        assert!(!context.validate_rules().unwrap());
        assert_eq!(context.results().len(), 1);
        assert!(!context.rules().get(1).unwrap().has_been_processed());
    }

    #[test]
    fn rule_errors_propagate_without_a_result() {
        let mut context = context(false, &[true]);
        context.rules_mut().add(Faulting {
            header: RuleHeader::new("Lookup", "lookup must succeed").unwrap(),
        });
        context
            .rules_mut()
            .add(PredicateRule::new("After", "after", || true).unwrap());

        let outcome = context.validate_rules();
        assert!(matches!(outcome, Err(ActionError::Fault(_))));
        assert_eq!(context.results().len(), 1);
        assert!(context.rules().get(1).unwrap().has_been_processed());
        assert!(!context.rules().get(2).unwrap().has_been_processed());
    }

    #[test]
    fn warnings_are_a_filter_over_results() {
        let mut context = ValidationContext::default();
        context
            .rules_mut()
            .add(PredicateRule::warning("Stock", "stock low", || false).unwrap());
        context
            .rules_mut()
            .add(PredicateRule::new("Open", "closed", || true).unwrap());
        context.validate_rules().unwrap();

        assert!(context.is_valid());
        assert_eq!(context.warnings().len(), 1);
        assert_eq!(context.warnings(), context.warnings());
    }

    #[test]
    fn to_validation_accumulates_all_failures() {
        let mut context = context(false, &[false, true, false]);
        context.validate_rules().unwrap();

        match context.to_validation() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.iter().all(|r| !r.is_valid()));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn to_validation_succeeds_when_all_pass() {
        let mut context = context(false, &[true, true]);
        context.validate_rules().unwrap();
        assert!(context.to_validation().is_success());
    }

    #[tokio::test]
    async fn async_loop_matches_sync_semantics() {
        let mut context = context(true, &[true, false, true]);
        assert!(!context.validate_rules_async().await.unwrap());
        assert_eq!(context.results().len(), 2);
        assert!(!context.rules().get(2).unwrap().has_been_processed());
    }

    #[tokio::test]
    async fn cancelled_token_stops_before_any_rule() {
        let mut context = context(false, &[true, true]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = context.validate_rules_cancellable(&cancel).await;
        assert!(matches!(
            outcome,
            Err(ActionError::Cancelled {
                stage: ProcessingStage::ValidateRules
            })
        ));
        assert!(context.results().is_empty());
    }

    #[tokio::test]
    async fn cancellation_interrupts_a_suspended_rule() {
        let mut context = ValidationContext::default();
        context.rules_mut().add(Slow {
            header: RuleHeader::new("Slow", "slow check").unwrap(),
        });
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let outcome = context.validate_rules_cancellable(&cancel).await;
        assert!(matches!(outcome, Err(ActionError::Cancelled { .. })));
        assert!(context.results().is_empty());
        assert!(context.rules().get(0).unwrap().has_been_processed());
    }
}
