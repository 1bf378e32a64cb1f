//! Rule sets and the validation loop.
//!
//! A `ValidationContext` owns the ordered rules of one logical unit of work
//! and the ordered results they produced. Rules run strictly in registration
//! order; with `stop_on_first_failure` the loop stops right after the first
//! invalid result and the remaining rules are never processed.
//!
//! A context is not safe for concurrent use. When parent and child actions
//! share one context, the caller must ensure only one action tree executes
//! against it at a time. No lock guards this.
//!
//! # Example
//!
//! ```rust
//! use rulegate::config::ActionConfig;
//! use rulegate::rules::{NotNullRule, RangeRule};
//! use rulegate::validation::ValidationContext;
//!
//! let mut context = ValidationContext::new(ActionConfig::default());
//! context.rules_mut().add(NotNullRule::new("Customer", "Customer is required", Some(7))?);
//! context.rules_mut().add(RangeRule::new("Quantity", "Quantity out of range", 0, 1, 10)?);
//!
//! let valid = context.validate_rules()?;
//! assert!(!valid);
//! assert_eq!(context.failed_results().len(), 1);
//! assert_eq!(context.passed_results().len(), 1);
//! # Ok::<(), rulegate::core::ActionError>(())
//! ```

mod context;
mod rule_set;

pub use context::ValidationContext;
pub use rule_set::RuleSet;
