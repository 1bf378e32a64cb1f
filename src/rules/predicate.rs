//! Closure-backed rules.

use crate::core::{ActionError, Rule, RuleHeader, RuleResult};

/// What a false predicate means.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Record an invalid result.
    Failure,
    /// Record a valid result flagged as a warning.
    Warning,
}

type Predicate = Box<dyn FnMut() -> bool + Send + Sync>;

/// Rule backed by a predicate closure.
pub struct PredicateRule {
    header: RuleHeader,
    severity: Severity,
    predicate: Predicate,
}

impl PredicateRule {
    /// Invalid when the predicate returns false.
    pub fn new<F>(
        name: impl Into<String>,
        message: impl Into<String>,
        predicate: F,
    ) -> Result<Self, ActionError>
    where
        F: FnMut() -> bool + Send + Sync + 'static,
    {
        Self::with_severity(name, message, Severity::Failure, predicate)
    }

    /// Always valid; a false predicate only raises a warning.
    pub fn warning<F>(
        name: impl Into<String>,
        message: impl Into<String>,
        predicate: F,
    ) -> Result<Self, ActionError>
    where
        F: FnMut() -> bool + Send + Sync + 'static,
    {
        Self::with_severity(name, message, Severity::Warning, predicate)
    }

    pub fn with_severity<F>(
        name: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        predicate: F,
    ) -> Result<Self, ActionError>
    where
        F: FnMut() -> bool + Send + Sync + 'static,
    {
        Ok(Self {
            header: RuleHeader::new(name, message)?,
            severity,
            predicate: Box::new(predicate),
        })
    }
}

impl Rule for PredicateRule {
    fn header(&self) -> &RuleHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut RuleHeader {
        &mut self.header
    }

    fn verify(&mut self) -> Result<RuleResult, ActionError> {
        let holds = (self.predicate)();
        match self.severity {
            Severity::Failure => Ok(self.header.conclude(holds)),
            Severity::Warning => {
                if !holds {
                    let warning = self.header.message().to_string();
                    self.header.warn(warning);
                }
                Ok(self.header.conclude(true))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RuleExt;

    #[test]
    fn failing_predicate_is_invalid() {
        let mut rule = PredicateRule::new("Open", "Account is closed", || false).unwrap();
        assert!(!rule.execute().unwrap().is_valid());
    }

    #[test]
    fn passing_predicate_is_valid() {
        let mut rule = PredicateRule::new("Open", "Account is closed", || true).unwrap();
        let result = rule.execute().unwrap();
        assert!(result.is_valid());
        assert!(!result.is_warning());
    }

    #[test]
    fn warning_severity_stays_valid() {
        let mut rule = PredicateRule::warning("Stock", "Stock is running low", || false).unwrap();
        let result = rule.execute().unwrap();

        assert!(result.is_valid());
        assert!(result.is_warning());
        assert_eq!(result.warning_message(), Some("Stock is running low"));
    }

    #[test]
    fn warning_severity_without_trigger_has_no_warning() {
        let mut rule = PredicateRule::warning("Stock", "Stock is running low", || true).unwrap();
        assert!(!rule.execute().unwrap().is_warning());
    }

    #[test]
    fn predicate_runs_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut rule = PredicateRule::new("Once", "runs once", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        })
        .unwrap();

        rule.execute().unwrap();
        assert!(rule.execute().is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
