//! Audit trail for tool invocations.
//!
//! Every request is logged when it arrives and completed with the response
//! status once the tool has run.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::request::ToolRequest;
use crate::response::{ResponseStatus, ToolResponse};
use crate::tool::EsgTool;

/// Entries kept before the oldest are dropped.
const MAX_AUDIT_ENTRIES: usize = 10_000;

/// An entry in the audit log.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    /// Unique entry ID
    pub entry_id: String,
    /// Request ID
    pub request_id: String,
    /// Response ID (if available)
    pub response_id: Option<String>,
    /// Tool invoked
    pub tool: EsgTool,
    /// Organization the tool acted on
    pub organization: String,
    /// Response status
    pub status: Option<ResponseStatus>,
    /// When the request was made
    pub requested_at: DateTime<Utc>,
    /// When the response was generated
    pub responded_at: Option<DateTime<Utc>>,
    /// Processing duration in ms
    pub duration_ms: Option<u64>,
}

impl AuditEntry {
    /// Create an entry from a request.
    pub fn from_request(request: &ToolRequest) -> Self {
        Self {
            entry_id: uuid::Uuid::new_v4().to_string(),
            request_id: request.request_id.clone(),
            response_id: None,
            tool: request.tool(),
            organization: request.organization.clone(),
            status: None,
            requested_at: request.requested_at,
            responded_at: None,
            duration_ms: None,
        }
    }

    fn complete(&mut self, response: &ToolResponse) {
        self.response_id = Some(response.response_id.clone());
        self.status = Some(response.status);
        self.responded_at = Some(response.responded_at);
        self.duration_ms = Some(
            (response.responded_at - self.requested_at)
                .num_milliseconds()
                .max(0) as u64,
        );
    }
}

/// Bounded audit log, newest entry first.
pub struct AuditLog {
    entries: Arc<RwLock<VecDeque<AuditEntry>>>,
    max_entries: usize,
}

impl AuditLog {
    /// Create a new audit log.
    pub fn new() -> Self {
        Self::with_max_entries(MAX_AUDIT_ENTRIES)
    }

    /// Create a log that keeps at most `max_entries`.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::new())),
            max_entries,
        }
    }

    /// Record an arriving request and return its entry ID.
    pub async fn log_request(&self, request: &ToolRequest) -> String {
        let entry = AuditEntry::from_request(request);
        let entry_id = entry.entry_id.clone();

        let mut entries = self.entries.write().await;
        entries.push_front(entry);

        while entries.len() > self.max_entries {
            entries.pop_back();
        }

        entry_id
    }

    /// Complete an entry with the tool's response.
    pub async fn log_response(&self, entry_id: &str, response: &ToolResponse) {
        let mut entries = self.entries.write().await;

        if let Some(entry) = entries.iter_mut().find(|e| e.entry_id == entry_id) {
            entry.complete(response);
        }
    }

    /// Newest entries first.
    pub async fn recent(&self, limit: usize) -> Vec<AuditEntry> {
        let entries = self.entries.read().await;
        entries.iter().take(limit).cloned().collect()
    }

    /// Get entry by request ID.
    pub async fn get_by_request(&self, request_id: &str) -> Option<AuditEntry> {
        let entries = self.entries.read().await;
        entries.iter().find(|e| e.request_id == request_id).cloned()
    }

    /// Get entries for an organization.
    pub async fn get_by_organization(&self, organization: &str, limit: usize) -> Vec<AuditEntry> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .filter(|e| e.organization == organization)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Counts by status and tool.
    pub async fn stats(&self) -> AuditStats {
        let entries = self.entries.read().await;

        let count = |status| entries.iter().filter(|e| e.status == Some(status)).count();
        let mut by_tool = HashMap::new();
        for entry in entries.iter() {
            *by_tool.entry(entry.tool).or_insert(0) += 1;
        }

        let finished: Vec<u64> = entries.iter().filter_map(|e| e.duration_ms).collect();
        let avg_duration_ms = if finished.is_empty() {
            0
        } else {
            finished.iter().sum::<u64>() / finished.len() as u64
        };

        AuditStats {
            total_requests: entries.len(),
            completed: count(ResponseStatus::Completed),
            declined: count(ResponseStatus::Declined),
            failed: count(ResponseStatus::Failed),
            by_tool,
            avg_duration_ms,
        }
    }

    /// Number of entries held.
    pub async fn count(&self) -> usize {
        self.entries.read().await.len()
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics from the audit log.
#[derive(Debug, Clone)]
pub struct AuditStats {
    /// Total requests logged
    pub total_requests: usize,
    pub completed: usize,
    pub declined: usize,
    pub failed: usize,
    /// Requests per tool
    pub by_tool: HashMap<EsgTool, usize>,
    /// Average processing duration of answered requests
    pub avg_duration_ms: u64,
}
