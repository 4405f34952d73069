//! Registry of the tools a service currently offers.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::types::EsgTool;

/// Registry of available tools and whether each is enabled.
pub struct ToolRegistry {
    tools: Arc<RwLock<HashMap<EsgTool, ToolMetadata>>>,
}

/// Metadata about a registered tool.
#[derive(Debug, Clone)]
pub struct ToolMetadata {
    /// Whether this tool is currently enabled
    pub enabled: bool,
    /// Number of completed invocations
    pub invocations: u64,
}

impl Default for ToolMetadata {
    fn default() -> Self {
        Self {
            enabled: true,
            invocations: 0,
        }
    }
}

impl ToolRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            tools: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a registry with every tool registered and enabled.
    pub async fn with_all() -> Self {
        let registry = Self::new();
        registry.register_all(EsgTool::all()).await;
        registry
    }

    /// Register a tool.
    pub async fn register(&self, tool: EsgTool) {
        let mut tools = self.tools.write().await;
        tools.entry(tool).or_default();
    }

    /// Register multiple tools.
    pub async fn register_all(&self, tools: impl IntoIterator<Item = EsgTool>) {
        for tool in tools {
            self.register(tool).await;
        }
    }

    /// Check if a tool is registered.
    pub async fn has(&self, tool: EsgTool) -> bool {
        self.tools.read().await.contains_key(&tool)
    }

    /// Check if a tool is registered and enabled.
    pub async fn is_available(&self, tool: EsgTool) -> bool {
        self.tools
            .read()
            .await
            .get(&tool)
            .map(|m| m.enabled)
            .unwrap_or(false)
    }

    /// Registered and enabled tools, in catalogue order.
    pub async fn available(&self) -> Vec<EsgTool> {
        let tools = self.tools.read().await;
        EsgTool::all()
            .into_iter()
            .filter(|t| tools.get(t).map(|m| m.enabled).unwrap_or(false))
            .collect()
    }

    /// Enable or disable a tool.
    pub async fn set_enabled(&self, tool: EsgTool, enabled: bool) {
        let mut tools = self.tools.write().await;
        if let Some(m) = tools.get_mut(&tool) {
            m.enabled = enabled;
        }
    }

    /// Count a completed invocation.
    pub async fn record_invocation(&self, tool: EsgTool) {
        let mut tools = self.tools.write().await;
        if let Some(m) = tools.get_mut(&tool) {
            m.invocations += 1;
        }
    }

    /// Get metadata for a tool.
    pub async fn get_metadata(&self, tool: EsgTool) -> Option<ToolMetadata> {
        self.tools.read().await.get(&tool).cloned()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_registry() {
        let registry = ToolRegistry::new();

        registry.register(EsgTool::StakeholderAnalysis).await;
        registry.register(EsgTool::ReportGeneration).await;

        assert!(registry.has(EsgTool::StakeholderAnalysis).await);
        assert!(!registry.has(EsgTool::DataCollection).await);
        assert!(registry.is_available(EsgTool::ReportGeneration).await);

        registry.set_enabled(EsgTool::ReportGeneration, false).await;

        assert!(registry.has(EsgTool::ReportGeneration).await);
        assert!(!registry.is_available(EsgTool::ReportGeneration).await);
        assert_eq!(registry.available().await, vec![EsgTool::StakeholderAnalysis]);
    }

    #[tokio::test]
    async fn test_invocation_count() {
        let registry = ToolRegistry::with_all().await;
        registry.record_invocation(EsgTool::DataCollection).await;
        registry.record_invocation(EsgTool::DataCollection).await;

        let meta = registry.get_metadata(EsgTool::DataCollection).await.unwrap();
        assert_eq!(meta.invocations, 2);
        assert_eq!(registry.available().await.len(), 4);
    }
}
