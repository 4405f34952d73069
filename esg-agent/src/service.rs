//! EsgToolService - main entry point for tool invocation.
//!
//! Each open organization sits behind its own async mutex, so calls against
//! one organization run one at a time while different organizations proceed
//! independently.

use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use esg_core::persistence::document_file_name;
use esg_core::{EsgConfig, EsgError, Organization, OrganizationStore, ReportSynthesizer};

use crate::audit::{AuditEntry, AuditLog};
use crate::render;
use crate::request::{DataOperation, ToolInput, ToolRequest};
use crate::response::ToolResponse;
use crate::tool::{EsgTool, ToolRegistry};

/// Error types for the service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Error from the ESG core
    #[error("ESG core error: {0}")]
    Core(#[from] EsgError),

    /// Tool not registered or disabled
    #[error("Tool not available: {}", .0.name())]
    ToolNotAvailable(EsgTool),

    /// Request validation error
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Tool result could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Handle to one open organization.
pub type OrganizationHandle = Arc<Mutex<Organization>>;

/// Main entry point for ESG tool invocation.
pub struct EsgToolService {
    config: EsgConfig,
    store: OrganizationStore,
    tools: Arc<ToolRegistry>,
    synthesizer: ReportSynthesizer,
    audit: Arc<AuditLog>,
    organizations: DashMap<String, OrganizationHandle>,
}

impl EsgToolService {
    /// Create a service with no tools registered.
    pub fn new(config: EsgConfig) -> Self {
        Self {
            store: OrganizationStore::from_config(&config),
            config,
            tools: Arc::new(ToolRegistry::new()),
            synthesizer: ReportSynthesizer::new(),
            audit: Arc::new(AuditLog::new()),
            organizations: DashMap::new(),
        }
    }

    /// Create a service with every tool registered.
    pub async fn with_all_tools(config: EsgConfig) -> Self {
        let service = Self::new(config);
        service.register_tools(EsgTool::all()).await;
        service
    }

    /// Use a specific report synthesizer (e.g. one with a fixed date).
    pub fn with_synthesizer(mut self, synthesizer: ReportSynthesizer) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    pub fn config(&self) -> &EsgConfig {
        &self.config
    }

    pub fn store(&self) -> &OrganizationStore {
        &self.store
    }

    /// Register tools this service can handle.
    pub async fn register_tools(&self, tools: impl IntoIterator<Item = EsgTool>) {
        self.tools.register_all(tools).await;
    }

    /// Enable or disable a registered tool.
    pub async fn set_tool_enabled(&self, tool: EsgTool, enabled: bool) {
        info!(tool = tool.name(), enabled, "Tool availability changed");
        self.tools.set_enabled(tool, enabled).await;
    }

    /// Get available tools.
    pub async fn available_tools(&self) -> Vec<EsgTool> {
        self.tools.available().await
    }

    /// Open an organization, loading its document or starting a new profile.
    ///
    /// Names that map to the same document share one handle. Already-open
    /// organizations are returned as they are in memory.
    pub fn open(&self, name: &str) -> Result<OrganizationHandle, ServiceError> {
        let key = document_file_name(name);
        if let Some(handle) = self.organizations.get(&key) {
            return Ok(Arc::clone(handle.value()));
        }

        let organization = self.store.load_or_create(name)?;
        debug!(organization = %name, document = %key, "Opened organization");

        let handle = self
            .organizations
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(organization)));
        Ok(Arc::clone(handle.value()))
    }

    /// Whether an organization is open in this service.
    pub fn is_open(&self, name: &str) -> bool {
        self.organizations.contains_key(&document_file_name(name))
    }

    /// A copy of an organization's current state.
    pub async fn snapshot(&self, name: &str) -> Result<Organization, ServiceError> {
        let handle = self.open(name)?;
        let organization = handle.lock().await;
        Ok(organization.clone())
    }

    /// Write an open organization to its default document.
    pub async fn persist(&self, name: &str) -> Result<PathBuf, ServiceError> {
        if !self.tools.is_available(EsgTool::DataCollection).await {
            return Err(ServiceError::ToolNotAvailable(EsgTool::DataCollection));
        }

        let handle = self.open(name)?;
        let organization = handle.lock().await;
        Ok(self.store.save_default(&organization)?)
    }

    /// Invoke a tool.
    ///
    /// Tool failures come back as `Failed` responses with the organization
    /// unchanged; only an invalid request or an unreadable document is an `Err`.
    pub async fn invoke(&self, request: ToolRequest) -> Result<ToolResponse, ServiceError> {
        request.validate().map_err(ServiceError::InvalidRequest)?;

        let entry_id = self.audit.log_request(&request).await;
        let tool = request.tool();

        debug!(
            request_id = %request.request_id,
            organization = %request.organization,
            tool = tool.name(),
            "Processing request"
        );

        if !self.tools.is_available(tool).await {
            let response = ToolResponse::declined(
                &request.request_id,
                tool,
                format!("Tool {} not available", tool.name()),
            );
            self.audit.log_response(&entry_id, &response).await;
            return Ok(response);
        }

        let outcome = match self.open(&request.organization) {
            Ok(handle) => {
                let mut organization = handle.lock().await;
                self.run_tool(&request, &mut organization)
            }
            Err(e) => Err(e),
        };
        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                let response = ToolResponse::failed(&request.request_id, tool, e.to_string());
                self.audit.log_response(&entry_id, &response).await;
                return Err(e);
            }
        };

        if response.is_completed() {
            self.tools.record_invocation(tool).await;
        } else {
            warn!(
                request_id = %request.request_id,
                tool = tool.name(),
                reason = %response.output,
                "Tool failed"
            );
        }

        self.audit.log_response(&entry_id, &response).await;
        Ok(response)
    }

    /// Get recent audit entries.
    pub async fn get_audit_log(&self, limit: usize) -> Vec<AuditEntry> {
        self.audit.recent(limit).await
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    fn run_tool(
        &self,
        request: &ToolRequest,
        organization: &mut Organization,
    ) -> Result<ToolResponse, ServiceError> {
        let request_id = request.request_id.as_str();
        let tool = request.tool();

        let response = match &request.input {
            ToolInput::DataCollection { operation } => {
                match self.collect(*operation, organization) {
                    Ok(output) => ToolResponse::completed(request_id, tool, output),
                    Err(e) => ToolResponse::failed(request_id, tool, e.to_string()),
                }
            }
            ToolInput::StakeholderAnalysis => {
                let ranked = organization.ranked_stakeholders();
                ToolResponse::completed(request_id, tool, render::stakeholder_analysis(&ranked))
                    .with_data(serde_json::to_value(&ranked)?)
            }
            ToolInput::MaterialityAssessment { top_n } => {
                let assessment = organization.assess_materiality();
                let n = top_n.unwrap_or(self.config.report.top_priorities);
                let data = serde_json::json!({
                    "top_priorities": assessment.top_priorities(n),
                    "issues": serde_json::to_value(&assessment.issues)?,
                });
                ToolResponse::completed(
                    request_id,
                    tool,
                    render::materiality_assessment(&assessment.issues),
                )
                .with_data(data)
            }
            ToolInput::ReportGeneration { framework } => {
                let framework = if framework.trim().is_empty() {
                    self.config.report.default_framework.as_str()
                } else {
                    framework.as_str()
                };
                match self.synthesizer.generate_and_record(organization, framework) {
                    Ok(report) => ToolResponse::completed(
                        request_id,
                        tool,
                        format!("Report generated: {}", report.title),
                    )
                    .with_data(serde_json::to_value(&report)?),
                    Err(e) => ToolResponse::failed(request_id, tool, e.to_string()),
                }
            }
        };

        Ok(response)
    }

    fn collect(
        &self,
        operation: DataOperation,
        organization: &mut Organization,
    ) -> Result<String, EsgError> {
        match operation {
            DataOperation::Load => {
                *organization = self.store.load(self.store.path_for(&organization.name))?;
                Ok(format!("Data loaded for {}", organization.name))
            }
            DataOperation::Save => {
                let path = self.store.save_default(organization)?;
                Ok(format!("Data saved to {}", path.display()))
            }
            DataOperation::Validate => {
                organization.validate()?;
                Ok(format!("Data for {} is valid", organization.name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ResponseStatus;
    use chrono::NaiveDate;
    use esg_core::{samples, ReportingFramework};

    async fn service_in(dir: &tempfile::TempDir) -> EsgToolService {
        let config = EsgConfig {
            data_path: dir.path().to_path_buf(),
            ..Default::default()
        };
        EsgToolService::with_all_tools(config).await.with_synthesizer(
            ReportSynthesizer::new().with_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
        )
    }

    async fn seeded_service(dir: &tempfile::TempDir) -> EsgToolService {
        let service = service_in(dir).await;
        let seed = samples::greentech_solutions().unwrap();
        service.store().save_default(&seed).unwrap();
        service
    }

    #[tokio::test]
    async fn test_stakeholder_analysis() {
        let dir = tempfile::tempdir().unwrap();
        let service = seeded_service(&dir).await;

        let response = service
            .invoke(ToolRequest::stakeholder_analysis("GreenTech Solutions"))
            .await
            .unwrap();

        assert_eq!(response.status, ResponseStatus::Completed);
        assert!(response.output.starts_with("Stakeholder Analysis Results:\n1. "));
        assert_eq!(response.data.unwrap()[0]["name"], "Institutional Investors");
    }

    #[tokio::test]
    async fn test_materiality_assessment_updates_scores() {
        let dir = tempfile::tempdir().unwrap();
        let service = seeded_service(&dir).await;

        let response = service
            .invoke(ToolRequest::materiality_assessment("GreenTech Solutions", Some(2)))
            .await
            .unwrap();

        let data = response.data.unwrap();
        assert_eq!(
            data["top_priorities"],
            serde_json::json!(["Data Privacy and Security", "Carbon Emissions"])
        );

        let org = service.snapshot("GreenTech Solutions").await.unwrap();
        assert_eq!(org.issue("Carbon Emissions").unwrap().materiality_score, 9.5);
    }

    #[tokio::test]
    async fn test_report_generation_records_report() {
        let dir = tempfile::tempdir().unwrap();
        let service = seeded_service(&dir).await;

        let response = service
            .invoke(ToolRequest::report_generation("GreenTech Solutions", "tcfd"))
            .await
            .unwrap();
        assert_eq!(
            response.output,
            "Report generated: GreenTech Solutions ESG Report (TCFD) - 2025-03-01"
        );

        let org = service.snapshot("GreenTech Solutions").await.unwrap();
        assert_eq!(org.reports().len(), 1);
        assert_eq!(org.reports()[0].framework, ReportingFramework::Tcfd);
    }

    #[tokio::test]
    async fn test_blank_framework_uses_configured_default() {
        let dir = tempfile::tempdir().unwrap();
        let service = seeded_service(&dir).await;

        let response = service
            .invoke(ToolRequest::report_generation("GreenTech Solutions", ""))
            .await
            .unwrap();
        assert!(response.output.ends_with("(GRI) - 2025-03-01"));
    }

    #[tokio::test]
    async fn test_rejected_framework_fails_without_side_effects() {
        let dir = tempfile::tempdir().unwrap();
        let service = seeded_service(&dir).await;

        let response = service
            .invoke(ToolRequest::report_generation("GreenTech Solutions", "CDP"))
            .await
            .unwrap();

        assert_eq!(response.status, ResponseStatus::Failed);
        assert!(response.output.contains("CDP"));
        let org = service.snapshot("GreenTech Solutions").await.unwrap();
        assert!(org.reports().is_empty());
        assert_eq!(service.audit().stats().await.failed, 1);
    }

    #[tokio::test]
    async fn test_tool_not_available() {
        let dir = tempfile::tempdir().unwrap();
        let service = EsgToolService::new(EsgConfig {
            data_path: dir.path().to_path_buf(),
            ..Default::default()
        });

        let response = service
            .invoke(ToolRequest::stakeholder_analysis("Acme"))
            .await
            .unwrap();
        assert_eq!(response.status, ResponseStatus::Declined);
        assert!(!service.is_open("Acme"));

        let err = service.persist("Acme").await.unwrap_err();
        assert!(matches!(err, ServiceError::ToolNotAvailable(EsgTool::DataCollection)));
    }

    #[tokio::test]
    async fn test_data_collection_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir).await;

        // New profile: nothing on disk yet
        let response = service
            .invoke(ToolRequest::stakeholder_analysis("Acme Corp"))
            .await
            .unwrap();
        assert_eq!(response.output, "No stakeholders found to analyze.");

        service
            .invoke(ToolRequest::report_generation("Acme Corp", "SASB"))
            .await
            .unwrap();
        let saved = service
            .invoke(ToolRequest::data_collection("Acme Corp", DataOperation::Save))
            .await
            .unwrap();
        assert!(saved.output.ends_with("acme_corp_esg_data.json"));

        let validated = service
            .invoke(ToolRequest::data_collection("Acme Corp", DataOperation::Validate))
            .await
            .unwrap();
        assert!(validated.is_completed());

        let reloaded = service.store().load_or_create("Acme Corp").unwrap();
        assert_eq!(reloaded.reports().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_request() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir).await;

        let err = service
            .invoke(ToolRequest::stakeholder_analysis(""))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRequest(_)));
        assert_eq!(service.audit().count().await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_reports_on_one_organization() {
        let dir = tempfile::tempdir().unwrap();
        let service = Arc::new(seeded_service(&dir).await);

        let mut handles = Vec::new();
        for framework in ["GRI", "SASB", "TCFD", "GRI"] {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service
                    .invoke(ToolRequest::report_generation("GreenTech Solutions", framework))
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_completed());
        }

        let org = service.snapshot("GreenTech Solutions").await.unwrap();
        assert_eq!(org.reports().len(), 4);
        assert_eq!(service.audit().stats().await.completed, 4);
    }

    #[tokio::test]
    async fn test_load_without_document_keeps_memory() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir).await;

        service
            .invoke(ToolRequest::report_generation("Acme", "GRI"))
            .await
            .unwrap();
        let response = service
            .invoke(ToolRequest::data_collection("Acme", DataOperation::Load))
            .await
            .unwrap();

        assert_eq!(response.status, ResponseStatus::Failed);
        assert!(response.output.contains("not found"));
        assert_eq!(service.snapshot("Acme").await.unwrap().reports().len(), 1);

        service.persist("Acme").await.unwrap();
        let reloaded = service
            .invoke(ToolRequest::data_collection("Acme", DataOperation::Load))
            .await
            .unwrap();
        assert!(reloaded.is_completed());
        assert_eq!(service.snapshot("Acme").await.unwrap().reports().len(), 1);
    }

    #[tokio::test]
    async fn test_names_sharing_a_document_share_one_organization() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir).await;

        service
            .invoke(ToolRequest::report_generation("Acme Corp", "GRI"))
            .await
            .unwrap();
        service
            .invoke(ToolRequest::report_generation("acme corp", "SASB"))
            .await
            .unwrap();
        assert!(service.is_open("ACME CORP"));

        let first = service.persist("Acme Corp").await.unwrap();
        let second = service.persist("acme corp").await.unwrap();
        assert_eq!(first, second);

        let on_disk = service.store().load(&first).unwrap();
        assert_eq!(on_disk.name, "Acme Corp");
        let frameworks: Vec<_> = on_disk.reports().iter().map(|r| r.framework).collect();
        assert_eq!(
            frameworks,
            vec![ReportingFramework::Gri, ReportingFramework::Sasb]
        );
    }

    #[tokio::test]
    async fn test_unreadable_document_is_audited_as_failed() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_in(&dir).await;
        std::fs::write(service.store().path_for("Broken"), "{").unwrap();

        let request = ToolRequest::stakeholder_analysis("Broken");
        let request_id = request.request_id.clone();
        let err = service.invoke(request).await.unwrap_err();
        assert!(matches!(err, ServiceError::Core(EsgError::MalformedData(_))));

        let entry = service.audit().get_by_request(&request_id).await.unwrap();
        assert_eq!(entry.status, Some(ResponseStatus::Failed));
        assert_eq!(service.audit().stats().await.failed, 1);
        assert!(!service.is_open("Broken"));
    }
}
