//! Value equality and inequality checks.

use crate::core::{ActionError, Rule, RuleHeader, RuleResult};

/// How an `EqualityRule` compares its operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual,
}

/// Compares two values under `PartialEq`.
pub struct EqualityRule<T> {
    header: RuleHeader,
    comparison: Comparison,
    left: T,
    right: T,
}

impl<T: PartialEq> EqualityRule<T> {
    /// Valid iff `left == right`.
    pub fn equal(
        name: impl Into<String>,
        message: impl Into<String>,
        left: T,
        right: T,
    ) -> Result<Self, ActionError> {
        Self::new(name, message, Comparison::Equal, left, right)
    }

    /// Valid iff `left != right`.
    pub fn not_equal(
        name: impl Into<String>,
        message: impl Into<String>,
        left: T,
        right: T,
    ) -> Result<Self, ActionError> {
        Self::new(name, message, Comparison::NotEqual, left, right)
    }

    pub fn new(
        name: impl Into<String>,
        message: impl Into<String>,
        comparison: Comparison,
        left: T,
        right: T,
    ) -> Result<Self, ActionError> {
        Ok(Self {
            header: RuleHeader::new(name, message)?,
            comparison,
            left,
            right,
        })
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }
}

impl<T: PartialEq + Send + Sync> Rule for EqualityRule<T> {
    fn header(&self) -> &RuleHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut RuleHeader {
        &mut self.header
    }

    fn verify(&mut self) -> Result<RuleResult, ActionError> {
        let equal = self.left == self.right;
        let valid = match self.comparison {
            Comparison::Equal => equal,
            Comparison::NotEqual => !equal,
        };
        Ok(self.header.conclude(valid))
    }
}
