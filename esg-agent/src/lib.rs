//! ESG Agent - tool surface for agent orchestrators
//!
//! Exposes the ESG core as a set of tools an external orchestration layer
//! can call:
//! - Tool catalogue and an enable/disable registry
//! - Request/response envelopes with text results for calling agents
//! - Per-organization serialization of tool calls
//! - Invocation audit trail
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           EsgToolService                │
//! │  (Main entry point for invocations)     │
//! └────────────────┬────────────────────────┘
//!                  │
//!      ┌───────────┴───────────┐
//!      ▼                       ▼
//! ┌─────────────┐       ┌──────────────────┐
//! │ ToolRegistry│       │ Organization     │
//! │ AuditLog    │       │ (one mutex each) │
//! └─────────────┘       └──────────────────┘
//! ```

pub mod audit;
pub mod render;
pub mod request;
pub mod response;
pub mod service;
pub mod tool;

// Re-export main types for convenience
pub use audit::{AuditEntry, AuditLog, AuditStats};
pub use request::{DataOperation, ToolInput, ToolRequest};
pub use response::{ResponseStatus, ToolResponse};
pub use service::{EsgToolService, OrganizationHandle, ServiceError};
pub use tool::{EsgTool, ToolRegistry};
