//! Presence checks over optional values.

use crate::core::{ActionError, Rule, RuleHeader, RuleResult};

/// Valid when the target holds a value.
pub struct NotNullRule<T> {
    header: RuleHeader,
    target: Option<T>,
}

impl<T> NotNullRule<T> {
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        target: Option<T>,
    ) -> Result<Self, ActionError> {
        Ok(Self {
            header: RuleHeader::new(name, message)?,
            target,
        })
    }
}

impl<T: Send + Sync> Rule for NotNullRule<T> {
    fn header(&self) -> &RuleHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut RuleHeader {
        &mut self.header
    }

    fn verify(&mut self) -> Result<RuleResult, ActionError> {
        let valid = self.target.is_some();
        Ok(self.header.conclude(valid))
    }
}

/// Valid when the target is absent.
pub struct IsNullRule<T> {
    header: RuleHeader,
    target: Option<T>,
}

impl<T> IsNullRule<T> {
    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        target: Option<T>,
    ) -> Result<Self, ActionError> {
        Ok(Self {
            header: RuleHeader::new(name, message)?,
            target,
        })
    }
}

impl<T: Send + Sync> Rule for IsNullRule<T> {
    fn header(&self) -> &RuleHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut RuleHeader {
        &mut self.header
    }

    fn verify(&mut self) -> Result<RuleResult, ActionError> {
        let valid = self.target.is_none();
        Ok(self.header.conclude(valid))
    }
}
