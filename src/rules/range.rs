//! Inclusive range check.

use crate::core::{ActionError, Rule, RuleHeader, RuleResult};
use std::fmt::Display;

/// Valid iff `min <= value <= max`.
///
/// A failing result states the value and both bounds.
pub struct RangeRule<T> {
    header: RuleHeader,
    value: T,
    min: T,
    max: T,
}

impl<T: PartialOrd + Display> RangeRule<T> {
    /// Create a range rule. Fails if `min > max`.
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        value: T,
        min: T,
        max: T,
    ) -> Result<Self, ActionError> {
        let header = RuleHeader::new(name, message)?;
        if min > max {
            return Err(ActionError::invalid_argument(format!(
                "rule '{}' has an empty range: minimum {min} exceeds maximum {max}",
                header.name()
            )));
        }
        Ok(Self {
            header,
            value,
            min,
            max,
        })
    }
}

impl<T> Rule for RangeRule<T>
where
    T: PartialOrd + Display + Send + Sync,
{
    fn header(&self) -> &RuleHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut RuleHeader {
        &mut self.header
    }

    fn verify(&mut self) -> Result<RuleResult, ActionError> {
        if self.min <= self.value && self.value <= self.max {
            return Ok(self.header.conclude(true));
        }
        let message = format!(
            "{}: value {} is outside the range [{}, {}]",
            self.header.message(),
            self.value,
            self.min,
            self.max
        );
        Ok(self.header.conclude_with(false, message))
    }
}
