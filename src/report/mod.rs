//! Audit reports for finished actions.
//!
//! A report captures the outcome of one pipeline run: terminal result, last
//! stage, every recorded rule result and the stage history. Reports serialize
//! to JSON for humans and to a compact binary form for storage.

use crate::core::{ActionResult, ProcessingStage, RuleResult, StageHistory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::ReportError;

/// Version identifier for the report format
pub const REPORT_VERSION: u32 = 1;

/// Serializable record of one action run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionReport {
    /// Report format version
    pub version: u32,

    /// Identifier of the pipeline run
    pub id: Uuid,

    /// Action name
    pub action: String,

    /// When the report was captured
    pub captured_at: DateTime<Utc>,

    pub result: ActionResult,

    /// Last stage entered
    pub stage: ProcessingStage,

    pub is_child_action: bool,

    /// Every result in the (possibly shared) validation context, in order
    pub results: Vec<RuleResult>,

    pub history: StageHistory,
}

impl ActionReport {
    pub(crate) fn new(
        id: Uuid,
        action: String,
        result: ActionResult,
        stage: ProcessingStage,
        is_child_action: bool,
        results: Vec<RuleResult>,
        history: StageHistory,
    ) -> Self {
        Self {
            version: REPORT_VERSION,
            id,
            action,
            captured_at: Utc::now(),
            result,
            stage,
            is_child_action,
            results,
            history,
        }
    }

    pub fn failed_results(&self) -> impl Iterator<Item = &RuleResult> {
        self.results.iter().filter(|r| !r.is_valid())
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        serde_json::to_string(self).map_err(|e| ReportError::SerializationFailed(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, ReportError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ReportError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        let report: Self = serde_json::from_str(json)
            .map_err(|e| ReportError::DeserializationFailed(e.to_string()))?;
        report.check_version()
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, ReportError> {
        bincode::serialize(self).map_err(|e| ReportError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, ReportError> {
        let report: Self = bincode::deserialize(bytes)
            .map_err(|e| ReportError::DeserializationFailed(e.to_string()))?;
        report.check_version()
    }

    fn check_version(self) -> Result<Self, ReportError> {
        if self.version != REPORT_VERSION {
            return Err(ReportError::UnsupportedVersion {
                found: self.version,
                supported: REPORT_VERSION,
            });
        }
        Ok(self)
    }
}
