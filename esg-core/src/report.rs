//! Report synthesis from an organization snapshot.
//!
//! Builds a Markdown document with an executive summary, one performance
//! section per ESG category and the action plan. Generating a report does not
//! touch the organization; [`record`] appends it to the history.

use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::error::Result;
use crate::types::{EsgCategory, Metric, Organization, Report, ReportingFramework};

/// Assembles ESG reports.
#[derive(Debug, Clone, Default)]
pub struct ReportSynthesizer {
    /// Fixed report date; today's UTC date when unset
    date: Option<NaiveDate>,
}

impl ReportSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp every report with `date` instead of today's date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Generate a report for a framework given by name (GRI, SASB or TCFD).
    pub fn generate(&self, organization: &Organization, framework: &str) -> Result<Report> {
        let framework = framework.parse::<ReportingFramework>()?;
        Ok(self.compose(organization, framework))
    }

    /// Generate a report for a known framework.
    pub fn compose(&self, organization: &Organization, framework: ReportingFramework) -> Report {
        let date = self.date.unwrap_or_else(|| Utc::now().date_naive());
        let title = format!(
            "{} ESG Report ({}) - {}",
            organization.name,
            framework,
            date.format("%Y-%m-%d")
        );

        let mut content = String::new();
        content.push_str(&format!("# {}\n\n", title));
        content.push_str(&executive_summary(organization, framework));

        for category in EsgCategory::all() {
            content.push_str(&category_section(organization, category));
        }

        content.push_str(&action_plan(organization));

        debug!(
            organization = %organization.name,
            framework = %framework,
            bytes = content.len(),
            "Composed ESG report"
        );

        Report {
            title,
            framework,
            date,
            content,
        }
    }

    /// Generate a report and append it to the organization's history.
    ///
    /// On an unsupported framework the history is left untouched.
    pub fn generate_and_record(
        &self,
        organization: &mut Organization,
        framework: &str,
    ) -> Result<Report> {
        let report = self.generate(organization, framework)?;
        record(organization, report.clone());
        Ok(report)
    }
}

/// Append a generated report to the organization's history.
pub fn record(organization: &mut Organization, report: Report) {
    debug!(organization = %organization.name, title = %report.title, "Recording report");
    organization.record_report(report);
}

fn executive_summary(organization: &Organization, framework: ReportingFramework) -> String {
    let mut section = String::from("## Executive Summary\n");
    section.push_str(&format!(
        "{} is committed to its ESG journey. ",
        organization.name
    ));
    match &organization.vision {
        Some(vision) => section.push_str(&format!("Our ESG vision: {}\n", vision.statement)),
        None => section.push_str("An ESG vision has not been defined yet.\n"),
    }
    section.push_str(framework.description());
    section.push_str("\n\n");
    section
}

fn category_section(organization: &Organization, category: EsgCategory) -> String {
    let mut section = format!("## {} Performance\n", category);
    let metrics: Vec<&Metric> = organization.metrics_in(category).collect();
    let label = category.as_str().to_lowercase();

    if metrics.is_empty() {
        section.push_str(&format!("No {} metrics collected yet.\n", label));
    } else {
        let lines: Vec<String> = metrics.iter().filter_map(|m| metric_line(m)).collect();
        if lines.is_empty() {
            section.push_str(&format!("No {} metric values reported yet.\n", label));
        } else {
            section.push_str("### Key Metrics\n");
            for line in lines {
                section.push_str(&line);
            }
        }
    }

    section.push('\n');
    section
}

/// `- name: value unit (Target: value unit)`; `None` when no current value.
fn metric_line(metric: &Metric) -> Option<String> {
    let current = metric.current_value?;
    let target = metric
        .target_value
        .map(|t| format!(" (Target: {} {})", metric_value(t), metric.unit))
        .unwrap_or_default();
    Some(format!(
        "- {}: {} {}{}\n",
        metric.name,
        metric_value(current),
        metric.unit,
        target
    ))
}

/// Whole numbers keep their decimal point: `15000.0`, `3.8`.
fn metric_value(value: f64) -> String {
    format!("{:?}", value)
}

fn action_plan(organization: &Organization) -> String {
    let mut section = String::from("## Action Plans and Progress\n");

    if organization.actions.is_empty() {
        section.push_str("No action plans defined yet.\n");
        return section;
    }

    for action in &organization.actions {
        section.push_str(&format!("### {}\n", action.name));
        section.push_str(&format!("**Status**: {}\n", action.status));
        section.push_str(&format!("**Description**: {}\n", action.description));
        section.push_str(&format!("**Timeline**: {}\n", action.timeline));
        section.push_str(&format!("**Responsible**: {}\n\n", action.responsible_party));
    }

    section
}
