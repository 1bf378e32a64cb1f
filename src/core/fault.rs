//! The designated fault a pipeline converts into a failed rule result.

use super::error::BoxError;
use std::error::Error as StdError;
use thiserror::Error;

/// Fault raised by collaborator code that the pipeline is allowed to absorb.
///
/// When a hook returns `ActionError::Fault`, the pipeline records a failed
/// result carrying either [`ActionFault::composed_message`] or the configured
/// generic text, and `execute` returns normally.
///
/// # Example
///
/// ```rust
/// use rulegate::core::ActionFault;
///
/// let io = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
/// let fault = ActionFault::new("Unable to post the invoice").with_source(io);
///
/// assert_eq!(
///     fault.composed_message(),
///     "Unable to post the invoice\n-> connection reset"
/// );
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ActionFault {
    message: String,
    use_fault_message: Option<bool>,
    #[source]
    source: Option<BoxError>,
}

impl ActionFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            use_fault_message: None,
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        self.source = Some(source.into());
        self
    }

    /// Override the configuration's disclosure policy for this fault only.
    pub fn with_fault_message(mut self, surface: bool) -> Self {
        self.use_fault_message = Some(surface);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Per-fault disclosure override, if one was set.
    pub fn use_fault_message(&self) -> Option<bool> {
        self.use_fault_message
    }

    /// The fault message followed by every chained cause, one per line.
    ///
    /// Each cause line is prefixed with one `-` per nesting level and `> `.
    pub fn composed_message(&self) -> String {
        let mut composed = self.message.clone();
        let mut depth = 1;
        let mut cause = StdError::source(self);
        while let Some(inner) = cause {
            composed.push('\n');
            composed.push_str(&"-".repeat(depth));
            composed.push_str("> ");
            composed.push_str(&inner.to_string());
            cause = inner.source();
            depth += 1;
        }
        composed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("row 17 violates constraint")]
    struct ConstraintError;

    #[derive(Debug, Error)]
    #[error("insert failed")]
    struct InsertError(#[source] ConstraintError);

    #[test]
    fn composed_message_without_causes_is_the_message() {
        let fault = ActionFault::new("Order could not be saved");
        assert_eq!(fault.composed_message(), "Order could not be saved");
    }

    #[test]
    fn composed_message_prefixes_each_nesting_level() {
        let fault = ActionFault::new("Order could not be saved")
            .with_source(InsertError(ConstraintError));

        assert_eq!(
            fault.composed_message(),
            "Order could not be saved\n-> insert failed\n--> row 17 violates constraint"
        );
    }

    #[test]
    fn nested_faults_are_walked_as_causes() {
        let inner = ActionFault::new("inventory service unavailable");
        let fault = ActionFault::new("Reservation failed").with_source(inner);

        let lines: Vec<_> = fault.composed_message().lines().map(String::from).collect();
        assert_eq!(lines, vec!["Reservation failed", "-> inventory service unavailable"]);
    }

    #[test]
    fn disclosure_override_is_optional() {
        let fault = ActionFault::new("x");
        assert_eq!(fault.use_fault_message(), None);

        let hidden = ActionFault::new("x").with_fault_message(false);
        assert_eq!(hidden.use_fault_message(), Some(false));
    }

    #[test]
    fn display_is_the_bare_message() {
        let fault = ActionFault::new("top").with_source(ConstraintError);
        assert_eq!(fault.to_string(), "top");
    }
}
