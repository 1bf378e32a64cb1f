//! Rulegate: validate business rules, then do the work
//!
//! Rulegate runs a unit of work as a staged pipeline. Rules are registered,
//! validated in order into a validation context, and only a fully valid
//! context lets the action's processing stages run. Expected business
//! failures are results to inspect, never errors to catch.
//!
//! # Core Concepts
//!
//! - **Rule**: A named precondition verified at most once
//! - **Validation Context**: Ordered rules and the results they produced
//! - **Action Pipeline**: The staged controller, synchronous or async
//! - **Designated fault**: `ActionFault`, the one error the pipeline turns
//!   into a failed result
//!
//! # Example
//!
//! ```rust
//! use rulegate::action::{Action, ActionPipeline};
//! use rulegate::config::ActionConfig;
//! use rulegate::core::{ActionError, ActionFault, ActionResult};
//! use rulegate::rules::NotNullRule;
//! use rulegate::validation::{RuleSet, ValidationContext};
//!
//! struct PlaceOrder {
//!     customer: Option<u32>,
//! }
//!
//! impl Action for PlaceOrder {
//!     fn add_rules(&mut self, rules: &mut RuleSet) -> Result<(), ActionError> {
//!         rules.add(NotNullRule::new("Customer", "Customer is required", self.customer)?);
//!         Ok(())
//!     }
//!
//!     fn process_action(&mut self, _context: &mut ValidationContext) -> Result<(), ActionError> {
//!         Err(ActionFault::new("inventory service unavailable").into())
//!     }
//! }
//!
//! let config = ActionConfig::builder().use_fault_message(false).build()?;
//! let mut pipeline = ActionPipeline::new(config);
//!
//! let result = pipeline.execute(&mut PlaceOrder { customer: Some(7) })?;
//! assert_eq!(result, ActionResult::Fail);
//!
//! let failed = pipeline.context().failed_results();
//! assert_eq!(failed[0].message(), rulegate::config::DEFAULT_FAULT_MESSAGE);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod action;
pub mod config;
pub mod core;
pub mod report;
pub mod rules;
pub mod validation;

// Re-export commonly used types
pub use action::{Action, ActionPipeline, AsyncAction, AsyncActionPipeline};
pub use config::ActionConfig;
pub use crate::core::{ActionError, ActionFault, ActionResult, ProcessingStage, Rule, RuleResult};
pub use validation::ValidationContext;
