//! Builder API for action configuration.

use crate::config::error::ConfigError;
use crate::config::{ActionConfig, TransactionHandle};

/// Builder for creating an `ActionConfig`
pub struct ConfigBuilder {
    config: ActionConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ActionConfig::default(),
        }
    }

    /// Stop running rules after the first failed result
    pub fn stop_on_first_failure(mut self, stop: bool) -> Self {
        self.config.stop_on_first_failure = stop;
        self
    }

    /// Surface absorbed fault messages
    pub fn use_fault_message(mut self, surface: bool) -> Self {
        self.config.use_fault_message = surface;
        self
    }

    /// Set the fallback text for undisclosed faults
    pub fn generic_fault_message(mut self, message: impl Into<String>) -> Self {
        self.config.generic_fault_message = message.into();
        self
    }

    /// Attach the caller's transactional resource
    pub fn transaction(mut self, handle: TransactionHandle) -> Self {
        self.config.transaction = Some(handle);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ActionConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_starts_from_defaults() {
        let config = ConfigBuilder::new().build().unwrap();
        assert!(!config.stop_on_first_failure);
        assert!(config.use_fault_message);
    }

    #[test]
    fn builder_sets_every_field() {
        let config = ConfigBuilder::new()
            .stop_on_first_failure(true)
            .use_fault_message(false)
            .generic_fault_message("Try again")
            .transaction(TransactionHandle::new("tx-1"))
            .build()
            .unwrap();

        assert!(config.stop_on_first_failure);
        assert!(!config.use_fault_message);
        assert_eq!(config.generic_fault_message, "Try again");
        let tx = config.transaction.as_ref().unwrap();
        assert_eq!(tx.downcast_ref::<&str>(), Some(&"tx-1"));
    }

    #[test]
    fn builder_rejects_blank_generic_message() {
        let result = ConfigBuilder::new().generic_fault_message("  ").build();
        assert!(matches!(result, Err(ConfigError::EmptyGenericFaultMessage)));
    }
}
