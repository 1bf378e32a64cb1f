//! Recorded outcome of one rule execution.

use super::error::ActionError;
use serde::{Deserialize, Serialize};

/// Outcome of executing a single rule.
///
/// A result is produced exactly once for every rule that actually executes
/// and is never changed after it is appended to a validation context.
///
/// # Example
///
/// ```rust
/// use rulegate::core::RuleResult;
///
/// let result = RuleResult::new("CustomerExists", "Customer 42 was not found", false)?;
/// assert!(!result.is_valid());
/// assert!(!result.is_warning());
/// # Ok::<(), rulegate::core::ActionError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    name: String,
    message: String,
    is_valid: bool,
    #[serde(default)]
    is_warning: bool,
    #[serde(default)]
    warning_message: Option<String>,
}

impl RuleResult {
    /// Create a result, rejecting an empty name or message.
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        is_valid: bool,
    ) -> Result<Self, ActionError> {
        let name = name.into();
        let message = message.into();
        if name.trim().is_empty() {
            return Err(ActionError::invalid_argument(
                "result name must not be empty",
            ));
        }
        if message.trim().is_empty() {
            return Err(ActionError::invalid_argument(format!(
                "result '{name}' must carry a message"
            )));
        }
        Ok(Self::from_parts(name, message, is_valid))
    }

    /// Build from parts that were already checked by a `RuleHeader`.
    pub(crate) fn from_parts(name: String, message: String, is_valid: bool) -> Self {
        Self {
            name,
            message,
            is_valid,
            is_warning: false,
            warning_message: None,
        }
    }

    /// Flag this result as a warning.
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.is_warning = true;
        self.warning_message = Some(warning.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn is_warning(&self) -> bool {
        self.is_warning
    }

    pub fn warning_message(&self) -> Option<&str> {
        self.warning_message.as_deref()
    }
}
