//! Pipeline policy configuration.
//!
//! `ActionConfig` controls short-circuit behaviour of the validation loop and
//! how absorbed faults are disclosed. It also carries an opaque transaction
//! handle that the pipeline passes through without ever examining it.
//!
//! # Example
//!
//! ```rust
//! use rulegate::config::ActionConfig;
//!
//! let config = ActionConfig::builder()
//!     .stop_on_first_failure(true)
//!     .use_fault_message(false)
//!     .generic_fault_message("The request could not be completed.")
//!     .build()?;
//!
//! assert!(config.stop_on_first_failure);
//! # Ok::<(), rulegate::config::ConfigError>(())
//! ```

pub mod builder;
pub mod error;

pub use builder::ConfigBuilder;
pub use error::ConfigError;

use crate::core::ActionFault;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Fallback text recorded for faults whose message is not surfaced.
pub const DEFAULT_FAULT_MESSAGE: &str =
    "An unexpected error occurred while processing the action.";

/// Opaque transactional resource owned by the caller.
///
/// The pipeline never opens, commits or rolls back the resource; hooks
/// retrieve it through [`TransactionHandle::downcast_ref`].
#[derive(Clone)]
pub struct TransactionHandle(Arc<dyn Any + Send + Sync>);

impl TransactionHandle {
    pub fn new<T: Any + Send + Sync>(resource: T) -> Self {
        Self(Arc::new(resource))
    }

    pub fn from_arc(resource: Arc<dyn Any + Send + Sync>) -> Self {
        Self(resource)
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for TransactionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TransactionHandle(..)")
    }
}

/// Policy for one action or validation context.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    /// Stop running rules after the first failed result.
    pub stop_on_first_failure: bool,

    /// Surface an absorbed fault's own message instead of the generic text.
    pub use_fault_message: bool,

    /// Text recorded when a fault's message is not surfaced.
    pub generic_fault_message: String,

    #[serde(skip)]
    pub transaction: Option<TransactionHandle>,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            stop_on_first_failure: false,
            use_fault_message: true,
            generic_fault_message: DEFAULT_FAULT_MESSAGE.to_string(),
            transaction: None,
        }
    }
}

impl ActionConfig {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generic_fault_message.trim().is_empty() {
            return Err(ConfigError::EmptyGenericFaultMessage);
        }
        Ok(())
    }

    /// Whether `fault`'s own message should be recorded.
    ///
    /// A per-fault override wins over `use_fault_message`.
    pub fn surfaces(&self, fault: &ActionFault) -> bool {
        fault.use_fault_message().unwrap_or(self.use_fault_message)
    }

    /// The message recorded for an absorbed fault.
    pub fn fault_message(&self, fault: &ActionFault) -> String {
        let message = if self.surfaces(fault) {
            fault.composed_message()
        } else {
            self.generic_fault_message.clone()
        };
        if message.trim().is_empty() {
            DEFAULT_FAULT_MESSAGE.to_string()
        } else {
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_process_every_rule_and_surface_faults() {
        let config = ActionConfig::default();
        assert!(!config.stop_on_first_failure);
        assert!(config.use_fault_message);
        assert_eq!(config.generic_fault_message, DEFAULT_FAULT_MESSAGE);
        assert!(config.transaction.is_none());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = ActionConfig::from_json(r#"{"stop_on_first_failure": true}"#).unwrap();
        assert!(config.stop_on_first_failure);
        assert!(config.use_fault_message);
        assert_eq!(config.generic_fault_message, DEFAULT_FAULT_MESSAGE);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = ActionConfig::from_json("{not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn empty_generic_message_is_rejected_from_json() {
        let result = ActionConfig::from_json(r#"{"generic_fault_message": ""}"#);
        assert!(matches!(result, Err(ConfigError::EmptyGenericFaultMessage)));
    }

    #[test]
    fn transaction_handle_is_not_serialized() {
        let config = ActionConfig {
            transaction: Some(TransactionHandle::new(7u32)),
            ..ActionConfig::default()
        };
        let json = config.to_json().unwrap();
        assert!(!json.contains("transaction"));
    }

    #[test]
    fn transaction_handle_downcasts_to_its_type() {
        struct Connection {
            id: u32,
        }

        let handle = TransactionHandle::new(Connection { id: 9 });
        assert_eq!(handle.downcast_ref::<Connection>().map(|c| c.id), Some(9));
        assert!(handle.downcast_ref::<String>().is_none());
    }

    #[test]
    fn fault_override_wins_over_config() {
        let config = ActionConfig {
            use_fault_message: false,
            ..ActionConfig::default()
        };

        assert!(!config.surfaces(&ActionFault::new("hidden")));
        assert!(config.surfaces(&ActionFault::new("shown").with_fault_message(true)));

        let open = ActionConfig::default();
        assert!(!open.surfaces(&ActionFault::new("hidden").with_fault_message(false)));
    }

    #[test]
    fn fault_message_follows_disclosure_policy() {
        let fault = ActionFault::new("constraint violated");

        assert_eq!(
            ActionConfig::default().fault_message(&fault),
            "constraint violated"
        );

        let closed = ActionConfig {
            use_fault_message: false,
            generic_fault_message: "Please try again later.".to_string(),
            ..ActionConfig::default()
        };
        assert_eq!(closed.fault_message(&fault), "Please try again later.");
    }

    #[test]
    fn empty_fault_message_falls_back_to_default() {
        let fault = ActionFault::new("");
        assert_eq!(ActionConfig::default().fault_message(&fault), DEFAULT_FAULT_MESSAGE);
    }
}
