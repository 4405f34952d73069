//! Tool request types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tool::EsgTool;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// What a data collection call does with the organization document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum DataOperation {
    /// Reload the document from the store
    Load,
    /// Write the in-memory organization to the store
    Save,
    /// Check the in-memory organization's invariants
    Validate,
}

/// Tool-specific input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(tag = "tool", rename_all = "kebab-case")]
pub enum ToolInput {
    DataCollection {
        operation: DataOperation,
    },
    StakeholderAnalysis,
    MaterialityAssessment {
        /// How many priorities to list; the configured default when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        top_n: Option<usize>,
    },
    ReportGeneration {
        /// Framework name, matched case-insensitively
        framework: String,
    },
}

impl ToolInput {
    /// The tool this input is addressed to.
    pub fn tool(&self) -> EsgTool {
        match self {
            Self::DataCollection { .. } => EsgTool::DataCollection,
            Self::StakeholderAnalysis => EsgTool::StakeholderAnalysis,
            Self::MaterialityAssessment { .. } => EsgTool::MaterialityAssessment,
            Self::ReportGeneration { .. } => EsgTool::ReportGeneration,
        }
    }
}

/// Request to invoke an ESG tool against one organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ToolRequest {
    /// Unique request identifier
    pub request_id: String,
    /// Organization the tool acts on
    pub organization: String,
    /// Tool input
    pub input: ToolInput,
    /// When the request was made
    pub requested_at: DateTime<Utc>,
}

impl ToolRequest {
    /// Create a new request.
    pub fn new(organization: impl Into<String>, input: ToolInput) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            organization: organization.into(),
            input,
            requested_at: Utc::now(),
        }
    }

    pub fn data_collection(organization: impl Into<String>, operation: DataOperation) -> Self {
        Self::new(organization, ToolInput::DataCollection { operation })
    }

    pub fn stakeholder_analysis(organization: impl Into<String>) -> Self {
        Self::new(organization, ToolInput::StakeholderAnalysis)
    }

    pub fn materiality_assessment(organization: impl Into<String>, top_n: Option<usize>) -> Self {
        Self::new(organization, ToolInput::MaterialityAssessment { top_n })
    }

    pub fn report_generation(
        organization: impl Into<String>,
        framework: impl Into<String>,
    ) -> Self {
        Self::new(
            organization,
            ToolInput::ReportGeneration {
                framework: framework.into(),
            },
        )
    }

    /// The tool being invoked.
    pub fn tool(&self) -> EsgTool {
        self.input.tool()
    }

    /// Check the request before dispatch.
    pub fn validate(&self) -> Result<(), String> {
        if self.organization.trim().is_empty() {
            return Err("organization name is required".to_string());
        }
        if let ToolInput::MaterialityAssessment { top_n: Some(0) } = self.input {
            return Err("top_n must be at least 1".to_string());
        }
        Ok(())
    }
}
