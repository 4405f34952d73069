//! ESG tool definitions.
//!
//! These are the operations an orchestrator's agents can call.

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Tools exposed to agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "kebab-case")]
pub enum EsgTool {
    /// Load, save or validate the organization's ESG data
    DataCollection,
    /// Rank stakeholders by influence
    StakeholderAnalysis,
    /// Score and prioritize material issues
    MaterialityAssessment,
    /// Generate a framework report and add it to the history
    ReportGeneration,
}

impl EsgTool {
    /// Name the orchestrator registers the tool under.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DataCollection => "data_collection_tool",
            Self::StakeholderAnalysis => "stakeholder_analysis_tool",
            Self::MaterialityAssessment => "materiality_assessment_tool",
            Self::ReportGeneration => "report_generation_tool",
        }
    }

    /// Get a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::DataCollection => "Collects and manages ESG data for an organization",
            Self::StakeholderAnalysis => "Analyzes stakeholders and their ESG expectations",
            Self::MaterialityAssessment => "Assesses and prioritizes material ESG issues",
            Self::ReportGeneration => {
                "Generates ESG reports based on collected data and metrics (GRI, SASB, TCFD)"
            }
        }
    }

    /// Whether the tool changes the organization record.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Self::DataCollection | Self::MaterialityAssessment | Self::ReportGeneration
        )
    }

    /// Look up a tool by its registered name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.name() == name)
    }

    /// All tools as a list.
    pub fn all() -> Vec<Self> {
        vec![
            Self::DataCollection,
            Self::StakeholderAnalysis,
            Self::MaterialityAssessment,
            Self::ReportGeneration,
        ]
    }
}
