//! Core rule and pipeline types.
//!
//! This module contains the data model shared by every other part of the crate:
//! - The `Rule` trait and its at-most-once execution guard
//! - `RuleResult`, the recorded outcome of one rule
//! - Pipeline stages, terminal results and stage history
//! - The designated `ActionFault` and the crate-wide `ActionError`

mod error;
mod fault;
mod history;
mod result;
mod rule;
mod stage;

pub use error::{ActionError, BoxError};
pub use fault::ActionFault;
pub use history::{StageHistory, StageTransition};
pub use result::RuleResult;
pub use rule::{Rule, RuleExt, RuleHeader};
pub use stage::{ActionResult, ProcessingStage};
