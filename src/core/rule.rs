//! The rule interface and its at-most-once execution guard.

use super::error::ActionError;
use super::result::RuleResult;
use async_trait::async_trait;

/// Name, message and lifecycle flags shared by every rule.
///
/// Name and message are fixed at construction. Validity starts unset and the
/// processed flag flips from `false` to `true` exactly once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleHeader {
    name: String,
    message: String,
    is_valid: Option<bool>,
    processed: bool,
    warning: Option<String>,
}

impl RuleHeader {
    /// Create a header, rejecting an empty name or message.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Result<Self, ActionError> {
        let name = name.into();
        let message = message.into();
        if name.trim().is_empty() {
            return Err(ActionError::invalid_argument("rule name must not be empty"));
        }
        if message.trim().is_empty() {
            return Err(ActionError::invalid_argument(format!(
                "rule '{name}' must carry a message"
            )));
        }
        Ok(Self {
            name,
            message,
            is_valid: None,
            processed: false,
            warning: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `None` until the rule has been verified.
    pub fn is_valid(&self) -> Option<bool> {
        self.is_valid
    }

    pub fn has_been_processed(&self) -> bool {
        self.processed
    }

    /// Attach a warning to the result produced by the next `conclude`.
    pub fn warn(&mut self, warning: impl Into<String>) {
        self.warning = Some(warning.into());
    }

    /// Record the verdict and build the result with the rule's own message.
    pub fn conclude(&mut self, valid: bool) -> RuleResult {
        let message = self.message.clone();
        self.conclude_with(valid, message)
    }

    /// Record the verdict and build the result with a more specific message.
    ///
    /// An empty message falls back to the rule's own message.
    pub fn conclude_with(&mut self, valid: bool, message: impl Into<String>) -> RuleResult {
        self.is_valid = Some(valid);
        let message = message.into();
        let message = if message.trim().is_empty() {
            self.message.clone()
        } else {
            message
        };
        let result = RuleResult::from_parts(self.name.clone(), message, valid);
        match self.warning.take() {
            Some(warning) => result.with_warning(warning),
            None => result,
        }
    }

    fn begin(&mut self) -> Result<(), ActionError> {
        if self.processed {
            return Err(ActionError::Reentrancy {
                name: self.name.clone(),
            });
        }
        self.processed = true;
        Ok(())
    }
}

/// A named, independently verifiable business precondition.
///
/// Implementors supply the header accessors and `verify`. Verification runs
/// through [`RuleExt::execute`], which enforces at-most-once execution.
///
/// # Example
///
/// ```rust
/// use rulegate::core::{ActionError, Rule, RuleExt, RuleHeader, RuleResult};
///
/// struct NonEmptyCart {
///     header: RuleHeader,
///     items: usize,
/// }
///
/// impl Rule for NonEmptyCart {
///     fn header(&self) -> &RuleHeader {
///         &self.header
///     }
///
///     fn header_mut(&mut self) -> &mut RuleHeader {
///         &mut self.header
///     }
///
///     fn verify(&mut self) -> Result<RuleResult, ActionError> {
///         let valid = self.items > 0;
///         Ok(self.header.conclude(valid))
///     }
/// }
///
/// let mut rule = NonEmptyCart {
///     header: RuleHeader::new("NonEmptyCart", "The cart has no items")?,
///     items: 0,
/// };
///
/// let result = rule.execute()?;
/// assert!(!result.is_valid());
/// assert!(rule.execute().is_err());
/// # Ok::<(), ActionError>(())
/// ```
#[async_trait]
pub trait Rule: Send + Sync {
    fn header(&self) -> &RuleHeader;

    fn header_mut(&mut self) -> &mut RuleHeader;

    /// Compute validity and return the result.
    fn verify(&mut self) -> Result<RuleResult, ActionError>;

    /// Asynchronous verification.
    ///
    /// Defaults to the synchronous `verify`.
    async fn verify_async(&mut self) -> Result<RuleResult, ActionError> {
        self.verify()
    }

    fn name(&self) -> &str {
        self.header().name()
    }

    fn message(&self) -> &str {
        self.header().message()
    }

    fn is_valid(&self) -> Option<bool> {
        self.header().is_valid()
    }

    fn has_been_processed(&self) -> bool {
        self.header().has_been_processed()
    }
}

/// Guarded execution for every rule.
///
/// Blanket-implemented, so the reentrancy guard cannot be bypassed by a
/// rule implementation.
#[async_trait]
pub trait RuleExt: Rule {
    /// Mark the rule processed and verify it.
    ///
    /// Fails with `ActionError::Reentrancy` if the rule was already processed.
    fn execute(&mut self) -> Result<RuleResult, ActionError> {
        self.header_mut().begin()?;
        self.verify()
    }

    async fn execute_async(&mut self) -> Result<RuleResult, ActionError> {
        self.header_mut().begin()?;
        self.verify_async().await
    }
}

impl<R: Rule + ?Sized> RuleExt for R {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flag {
        header: RuleHeader,
        value: bool,
        verified: usize,
    }

    impl Flag {
        fn new(value: bool) -> Self {
            Self {
                header: RuleHeader::new("Flag", "flag must be set").unwrap(),
                value,
                verified: 0,
            }
        }
    }

    impl Rule for Flag {
        fn header(&self) -> &RuleHeader {
            &self.header
        }

        fn header_mut(&mut self) -> &mut RuleHeader {
            &mut self.header
        }

        fn verify(&mut self) -> Result<RuleResult, ActionError> {
            self.verified += 1;
            Ok(self.header.conclude(self.value))
        }
    }

    #[test]
    fn header_rejects_empty_name() {
        assert!(matches!(
            RuleHeader::new("", "message"),
            Err(ActionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn header_rejects_empty_message() {
        assert!(matches!(
            RuleHeader::new("Name", ""),
            Err(ActionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn validity_is_unset_before_execution() {
        let rule = Flag::new(true);
        assert_eq!(rule.is_valid(), None);
        assert!(!rule.has_been_processed());
    }

    #[test]
    fn execute_marks_processed_and_records_validity() {
        let mut rule = Flag::new(true);
        let result = rule.execute().unwrap();

        assert!(result.is_valid());
        assert_eq!(result.name(), "Flag");
        assert_eq!(result.message(), "flag must be set");
        assert_eq!(rule.is_valid(), Some(true));
        assert!(rule.has_been_processed());
    }

    #[test]
    fn second_execution_is_rejected_without_verifying() {
        let mut rule = Flag::new(false);
        rule.execute().unwrap();

        let second = rule.execute();
        assert!(matches!(second, Err(ActionError::Reentrancy { ref name }) if name == "Flag"));
        assert_eq!(rule.verified, 1);
    }

    #[test]
    fn boxed_rules_execute_through_the_extension() {
        let mut rule: Box<dyn Rule> = Box::new(Flag::new(true));
        assert!(rule.execute().unwrap().is_valid());
        assert!(rule.has_been_processed());
    }

    #[test]
    fn conclude_with_empty_message_falls_back() {
        let mut header = RuleHeader::new("Rule", "default").unwrap();
        let result = header.conclude_with(false, "");
        assert_eq!(result.message(), "default");
    }

    #[test]
    fn warning_is_carried_into_result() {
        let mut header = RuleHeader::new("Rule", "default").unwrap();
        header.warn("close to the limit");
        let result = header.conclude(true);

        assert!(result.is_warning());
        assert_eq!(result.warning_message(), Some("close to the limit"));
    }

    #[tokio::test]
    async fn async_execution_shares_the_guard() {
        let mut rule = Flag::new(true);
        assert!(rule.execute_async().await.unwrap().is_valid());
        assert!(matches!(
            rule.execute_async().await,
            Err(ActionError::Reentrancy { .. })
        ));
        assert!(matches!(rule.execute(), Err(ActionError::Reentrancy { .. })));
    }
}
