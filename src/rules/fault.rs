//! Rule recording an absorbed fault.

use crate::core::{ActionError, ActionFault, Rule, RuleHeader, RuleResult};

/// Name given to rules synthesized from absorbed faults.
pub const FAULT_RULE_NAME: &str = "ActionFault";

/// Always invalid; carries the fault it was built from.
#[derive(Debug)]
pub struct FaultRule {
    header: RuleHeader,
    fault: ActionFault,
}

impl FaultRule {
    /// Build a rule whose message is the fault's composed message.
    pub fn new(fault: ActionFault) -> Result<Self, ActionError> {
        let message = fault.composed_message();
        Self::with_message(message, fault)
    }

    /// Build a rule with a replacement message, keeping the fault attached.
    pub fn with_message(message: impl Into<String>, fault: ActionFault) -> Result<Self, ActionError> {
        Ok(Self {
            header: RuleHeader::new(FAULT_RULE_NAME, message)?,
            fault,
        })
    }

    pub fn fault(&self) -> &ActionFault {
        &self.fault
    }

    pub fn into_fault(self) -> ActionFault {
        self.fault
    }
}

impl Rule for FaultRule {
    fn header(&self) -> &RuleHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut RuleHeader {
        &mut self.header
    }

    fn verify(&mut self) -> Result<RuleResult, ActionError> {
        Ok(self.header.conclude(false))
    }
}
