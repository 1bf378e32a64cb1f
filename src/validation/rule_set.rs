//! Ordered rule list with a validated prefix.

use crate::core::Rule;

/// Ordered list of rules awaiting or having completed validation.
///
/// The set remembers how many of its rules were already handed to a
/// validation pass. Only the pending tail may be removed, so indices of
/// processed rules never shift.
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
    handed_off: usize,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule at the end of the set.
    pub fn add<R: Rule + 'static>(&mut self, rule: R) {
        self.rules.push(Box::new(rule));
    }

    pub fn add_boxed(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of rules not yet handed to a validation pass.
    pub fn pending(&self) -> usize {
        self.rules.len() - self.handed_off
    }

    pub fn get(&self, index: usize) -> Option<&(dyn Rule + 'static)> {
        self.rules.get(index).map(|rule| &**rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(dyn Rule + 'static)> {
        self.rules.iter().map(|rule| &**rule)
    }

    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|rule| rule.name()).collect()
    }

    /// Keep only the pending rules for which `keep` returns true.
    ///
    /// Rules already handed to a validation pass are never removed.
    pub fn retain_pending<F>(&mut self, mut keep: F)
    where
        F: FnMut(&dyn Rule) -> bool,
    {
        let pending = self.rules.split_off(self.handed_off);
        self.rules
            .extend(pending.into_iter().filter(|rule| keep(&**rule)));
    }

    /// Claim the next pending rule for execution.
    pub(crate) fn next_pending(&mut self) -> Option<&mut Box<dyn Rule>> {
        if self.handed_off >= self.rules.len() {
            return None;
        }
        let index = self.handed_off;
        self.handed_off += 1;
        self.rules.get_mut(index)
    }

    /// Abandon every pending rule without executing it.
    pub(crate) fn skip_pending(&mut self) -> usize {
        let skipped = self.pending();
        self.handed_off = self.rules.len();
        skipped
    }
}
