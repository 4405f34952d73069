//! Tool catalogue and registry.
//!
//! An orchestrator's agents call the ESG core through these tools. This
//! module defines them and the registry that switches them on and off.

pub mod registry;
pub mod types;

pub use registry::ToolRegistry;
pub use types::EsgTool;
