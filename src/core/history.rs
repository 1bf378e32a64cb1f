//! Stage transition history tracking.
//!
//! Every pipeline keeps an ordered, timestamped record of the stages it
//! passed through so a finished action can be audited after the fact.

use super::stage::ProcessingStage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single stage transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageTransition {
    /// The stage being left
    pub from: ProcessingStage,
    /// The stage being entered
    pub to: ProcessingStage,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of stage transitions.
///
/// History is immutable - the `record` method returns a new history
/// with the transition added.
///
/// # Example
///
/// ```rust
/// use rulegate::core::{ProcessingStage, StageHistory, StageTransition};
/// use chrono::Utc;
///
/// let history = StageHistory::new();
///
/// let history = history.record(StageTransition {
///     from: ProcessingStage::NotStarted,
///     to: ProcessingStage::PreAddRules,
///     timestamp: Utc::now(),
/// });
///
/// let history = history.record(StageTransition {
///     from: ProcessingStage::PreAddRules,
///     to: ProcessingStage::AddRules,
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // NotStarted -> PreAddRules -> AddRules
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StageHistory {
    transitions: Vec<StageTransition>,
}

impl StageHistory {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: StageTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of stages traversed.
    ///
    /// Returns the starting stage, then the `to` stage of each transition.
    pub fn get_path(&self) -> Vec<ProcessingStage> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Calculate total duration from first to last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[StageTransition] {
        &self.transitions
    }

    /// Whether the history ever entered `stage`.
    pub fn visited(&self, stage: ProcessingStage) -> bool {
        self.transitions.iter().any(|t| t.to == stage)
    }
}
