//! Tool response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tool::EsgTool;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Status of a tool response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The tool ran and its result is in the response
    Completed,
    /// The tool is not available on this service
    Declined,
    /// The tool ran and reported an error; nothing was changed
    Failed,
}

/// Response from a tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ToolResponse {
    /// Unique response identifier
    pub response_id: String,
    /// Request ID this responds to
    pub request_id: String,
    /// Tool that handled this
    pub tool: EsgTool,
    /// Response status
    pub status: ResponseStatus,
    /// Text result for the calling agent
    pub output: String,
    /// Structured result, when the tool produces one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// When the response was generated
    pub responded_at: DateTime<Utc>,
}

impl ToolResponse {
    fn build(
        request_id: impl Into<String>,
        tool: EsgTool,
        status: ResponseStatus,
        output: impl Into<String>,
    ) -> Self {
        Self {
            response_id: uuid::Uuid::new_v4().to_string(),
            request_id: request_id.into(),
            tool,
            status,
            output: output.into(),
            data: None,
            responded_at: Utc::now(),
        }
    }

    /// Create a successful response.
    pub fn completed(
        request_id: impl Into<String>,
        tool: EsgTool,
        output: impl Into<String>,
    ) -> Self {
        Self::build(request_id, tool, ResponseStatus::Completed, output)
    }

    /// Create a declined response.
    pub fn declined(
        request_id: impl Into<String>,
        tool: EsgTool,
        reason: impl Into<String>,
    ) -> Self {
        Self::build(request_id, tool, ResponseStatus::Declined, reason)
    }

    /// Create a failed response.
    pub fn failed(request_id: impl Into<String>, tool: EsgTool, error: impl Into<String>) -> Self {
        Self::build(request_id, tool, ResponseStatus::Failed, error)
    }

    /// Attach structured data.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == ResponseStatus::Completed
    }
}
