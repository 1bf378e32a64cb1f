//! Concrete rule kinds.
//!
//! Each kind embeds a `RuleHeader` and differs from the others only in its
//! `verify` logic.
//!
//! # Example
//!
//! ```rust
//! use rulegate::core::RuleExt;
//! use rulegate::rules::{EqualityRule, RangeRule};
//!
//! let mut quantity = RangeRule::new("Quantity", "Quantity is out of range", 150, 10, 100)?;
//! let result = quantity.execute()?;
//! assert!(!result.is_valid());
//! assert!(result.message().contains("150"));
//!
//! let mut currency = EqualityRule::equal("Currency", "Currencies must match", "EUR", "EUR")?;
//! assert!(currency.execute()?.is_valid());
//! # Ok::<(), rulegate::core::ActionError>(())
//! ```

mod equality;
mod fault;
mod predicate;
mod presence;
mod range;

pub use equality::{Comparison, EqualityRule};
pub use fault::{FaultRule, FAULT_RULE_NAME};
pub use predicate::{PredicateRule, Severity};
pub use presence::{IsNullRule, NotNullRule};
pub use range::RangeRule;
