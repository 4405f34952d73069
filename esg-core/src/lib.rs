//! ESG Core - organization data model, materiality scoring and reporting
//!
//! A pure, synchronous library that an agent orchestrator, CLI or web
//! handler can call as a set of tools:
//!
//! - **Record types**: vision, stakeholders, material issues, metrics,
//!   actions and reports, aggregated into an [`Organization`]
//! - **Scoring**: stakeholder ranking and materiality assessment
//! - **Reporting**: GRI / SASB / TCFD report synthesis
//! - **Persistence**: whole-document JSON load and save
//!
//! # Example
//!
//! ```ignore
//! use esg_core::{record, OrganizationStore, ReportSynthesizer};
//!
//! let store = OrganizationStore::new("data");
//! let mut org = store.load_or_create("GreenTech Solutions")?;
//!
//! let assessment = org.assess_materiality();
//! println!("Top priorities: {:?}", assessment.top_priorities(5));
//!
//! let report = ReportSynthesizer::new().generate(&org, "GRI")?;
//! record(&mut org, report);
//! store.save_default(&org)?;
//! ```

pub mod config;
pub mod error;
pub mod persistence;
pub mod report;
pub mod samples;
pub mod scoring;
pub mod types;

// Re-export main types
pub use config::EsgConfig;
pub use error::{EsgError, Result};
pub use persistence::{load, save, OrganizationStore};
pub use report::{record, ReportSynthesizer};
pub use scoring::{
    rank_stakeholders, score_materiality, stakeholder_categories, MaterialityAssessment,
};
pub use types::*;
