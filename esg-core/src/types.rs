//! Core record types for an organization's ESG profile.
//!
//! Records are plain serde structs. Ranged fields go through [`Rating`], so
//! an out-of-range value cannot be constructed or deserialized.
//!
//! With the `typescript` feature enabled, these types can be exported to TypeScript
//! using ts-rs for a shared shape with web front ends.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::error::{EsgError, Result};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Current version of the persisted organization document.
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// An importance or influence rating in `[1, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Create a rating, rejecting values outside `[1, 10]`.
    pub fn new(value: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(EsgError::validation(format!(
                "rating {} outside [{}, {}]",
                value,
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = EsgError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ESG pillar a metric or issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum EsgCategory {
    #[serde(alias = "environmental")]
    Environmental,
    #[serde(alias = "social")]
    Social,
    #[serde(alias = "governance")]
    Governance,
}

impl EsgCategory {
    /// All categories in report order.
    pub fn all() -> [Self; 3] {
        [Self::Environmental, Self::Social, Self::Governance]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Environmental => "Environmental",
            Self::Social => "Social",
            Self::Governance => "Governance",
        }
    }
}

impl fmt::Display for EsgCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EsgCategory {
    type Err = EsgError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "environmental" | "e" => Ok(Self::Environmental),
            "social" | "s" => Ok(Self::Social),
            "governance" | "g" => Ok(Self::Governance),
            other => Err(EsgError::validation(format!("unknown ESG category: {other}"))),
        }
    }
}

/// Progress state of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum ActionStatus {
    #[default]
    #[serde(rename = "Planned", alias = "planned")]
    Planned,
    #[serde(rename = "Planning Phase", alias = "planning_phase", alias = "planning phase")]
    PlanningPhase,
    #[serde(rename = "In Progress", alias = "in_progress", alias = "in progress")]
    InProgress,
    #[serde(rename = "On Hold", alias = "on_hold", alias = "on hold")]
    OnHold,
    #[serde(rename = "Completed", alias = "completed")]
    Completed,
}

impl ActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::PlanningPhase => "Planning Phase",
            Self::InProgress => "In Progress",
            Self::OnHold => "On Hold",
            Self::Completed => "Completed",
        }
    }

    /// Whether work on the action has finished.
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionStatus {
    type Err = EsgError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "planned" => Ok(Self::Planned),
            "planning phase" | "planning" => Ok(Self::PlanningPhase),
            "in progress" => Ok(Self::InProgress),
            "on hold" => Ok(Self::OnHold),
            "completed" | "done" => Ok(Self::Completed),
            _ => Err(EsgError::validation(format!("unknown action status: {s}"))),
        }
    }
}

/// Named external reporting standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum ReportingFramework {
    #[serde(rename = "GRI")]
    Gri,
    #[serde(rename = "SASB")]
    Sasb,
    #[serde(rename = "TCFD")]
    Tcfd,
}

impl ReportingFramework {
    pub fn all() -> [Self; 3] {
        [Self::Gri, Self::Sasb, Self::Tcfd]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gri => "GRI",
            Self::Sasb => "SASB",
            Self::Tcfd => "TCFD",
        }
    }

    /// One-line statement of the standard a report follows.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Gri => "This report has been prepared with reference to the GRI Standards.",
            Self::Sasb => "This report follows the SASB Standards for industry-specific disclosure.",
            Self::Tcfd => {
                "This report is structured around the TCFD recommendations on climate-related financial disclosure."
            }
        }
    }
}

impl Default for ReportingFramework {
    fn default() -> Self {
        Self::Gri
    }
}

impl fmt::Display for ReportingFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportingFramework {
    type Err = EsgError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GRI" => Ok(Self::Gri),
            "SASB" => Ok(Self::Sasb),
            "TCFD" => Ok(Self::Tcfd),
            _ => Err(EsgError::UnsupportedFramework(s.to_string())),
        }
    }
}

/// The organization's ESG vision and goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Vision {
    /// Vision statement, quoted verbatim in reports
    #[serde(alias = "vision_statement")]
    pub statement: String,
    #[serde(default)]
    pub environmental_goals: Vec<String>,
    #[serde(default)]
    pub social_goals: Vec<String>,
    #[serde(default)]
    pub governance_goals: Vec<String>,
}

impl Vision {
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            environmental_goals: Vec::new(),
            social_goals: Vec::new(),
            governance_goals: Vec::new(),
        }
    }

    /// Add a goal under the given pillar.
    pub fn goal(mut self, category: EsgCategory, goal: impl Into<String>) -> Self {
        self.goals_mut(category).push(goal.into());
        self
    }

    pub fn goals(&self, category: EsgCategory) -> &[String] {
        match category {
            EsgCategory::Environmental => &self.environmental_goals,
            EsgCategory::Social => &self.social_goals,
            EsgCategory::Governance => &self.governance_goals,
        }
    }

    fn goals_mut(&mut self, category: EsgCategory) -> &mut Vec<String> {
        match category {
            EsgCategory::Environmental => &mut self.environmental_goals,
            EsgCategory::Social => &mut self.social_goals,
            EsgCategory::Governance => &mut self.governance_goals,
        }
    }
}

/// A stakeholder group and its expectations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Stakeholder {
    pub name: String,
    /// Free-form grouping (Investor, Customer, Regulator, ...)
    pub category: String,
    pub influence_level: Rating,
    #[serde(default)]
    pub expectations: Vec<String>,
}

impl Stakeholder {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        influence_level: u8,
    ) -> Result<Self> {
        let name = non_empty("stakeholder name", name.into())?;
        Ok(Self {
            name,
            category: category.into(),
            influence_level: Rating::new(influence_level)?,
            expectations: Vec::new(),
        })
    }

    pub fn expects(mut self, expectation: impl Into<String>) -> Self {
        self.expectations.push(expectation.into());
        self
    }
}

/// A material ESG issue with business and stakeholder importance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct MaterialIssue {
    /// Unique within an organization
    pub name: String,
    pub category: EsgCategory,
    pub importance_to_business: Rating,
    pub importance_to_stakeholders: Rating,
    #[serde(default)]
    pub description: String,
    /// Derived by scoring; never set by callers
    #[serde(default)]
    pub materiality_score: f64,
}

impl MaterialIssue {
    pub fn new(
        name: impl Into<String>,
        category: EsgCategory,
        importance_to_business: u8,
        importance_to_stakeholders: u8,
    ) -> Result<Self> {
        Ok(Self {
            name: non_empty("material issue name", name.into())?,
            category,
            importance_to_business: Rating::new(importance_to_business)?,
            importance_to_stakeholders: Rating::new(importance_to_stakeholders)?,
            description: String::new(),
            materiality_score: 0.0,
        })
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A tracked ESG metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Metric {
    pub name: String,
    pub category: EsgCategory,
    pub unit: String,
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default)]
    pub target_value: Option<f64>,
    #[serde(default)]
    pub data_source: String,
}

impl Metric {
    pub fn new(
        name: impl Into<String>,
        category: EsgCategory,
        unit: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            name: non_empty("metric name", name.into())?,
            category,
            unit: unit.into(),
            current_value: None,
            target_value: None,
            data_source: String::new(),
        })
    }

    pub fn with_current(mut self, value: f64) -> Self {
        self.current_value = Some(value);
        self
    }

    pub fn with_target(mut self, value: f64) -> Self {
        self.target_value = Some(value);
        self
    }

    pub fn sourced_from(mut self, source: impl Into<String>) -> Self {
        self.data_source = source.into();
        self
    }
}

/// A planned or running ESG action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Action {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub responsible_party: String,
    #[serde(default)]
    pub timeline: String,
    #[serde(default)]
    pub resources_required: String,
    #[serde(default)]
    pub status: ActionStatus,
    /// Metric names; not checked against the organization's metrics
    #[serde(default)]
    pub related_metrics: BTreeSet<String>,
}

/// Builder for creating actions.
pub struct ActionBuilder {
    name: String,
    description: String,
    responsible_party: String,
    timeline: String,
    resources_required: String,
    status: ActionStatus,
    related_metrics: BTreeSet<String>,
}

impl ActionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            responsible_party: String::new(),
            timeline: String::new(),
            resources_required: String::new(),
            status: ActionStatus::default(),
            related_metrics: BTreeSet::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn responsible_party(mut self, party: impl Into<String>) -> Self {
        self.responsible_party = party.into();
        self
    }

    pub fn timeline(mut self, timeline: impl Into<String>) -> Self {
        self.timeline = timeline.into();
        self
    }

    pub fn resources_required(mut self, resources: impl Into<String>) -> Self {
        self.resources_required = resources.into();
        self
    }

    pub fn status(mut self, status: ActionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn related_metric(mut self, metric: impl Into<String>) -> Self {
        self.related_metrics.insert(metric.into());
        self
    }

    pub fn build(self) -> Result<Action> {
        Ok(Action {
            name: non_empty("action name", self.name)?,
            description: self.description,
            responsible_party: self.responsible_party,
            timeline: self.timeline,
            resources_required: self.resources_required,
            status: self.status,
            related_metrics: self.related_metrics,
        })
    }
}

/// A generated report. Never modified once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Report {
    pub title: String,
    pub framework: ReportingFramework,
    /// ISO date (`YYYY-MM-DD`)
    pub date: NaiveDate,
    pub content: String,
}

/// An organization's complete ESG profile.
///
/// This is the unit of persistence: it is always written and read whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Organization {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Display name, also the persistence key
    pub name: String,
    #[serde(default)]
    pub vision: Option<Vision>,
    #[serde(default)]
    pub stakeholders: Vec<Stakeholder>,
    #[serde(default)]
    pub material_issues: Vec<MaterialIssue>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub actions: Vec<Action>,
    /// Append-only report history
    #[serde(default)]
    reports: Vec<Report>,
}

impl Organization {
    /// Create an empty profile.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            schema_version: SCHEMA_VERSION,
            name: non_empty("organization name", name.into())?,
            vision: None,
            stakeholders: Vec::new(),
            material_issues: Vec::new(),
            metrics: Vec::new(),
            actions: Vec::new(),
            reports: Vec::new(),
        })
    }

    pub fn with_vision(mut self, vision: Vision) -> Self {
        self.vision = Some(vision);
        self
    }

    /// Metrics in one category, in insertion order.
    pub fn metrics_in(&self, category: EsgCategory) -> impl Iterator<Item = &Metric> {
        self.metrics.iter().filter(move |m| m.category == category)
    }

    /// Look up a material issue by name.
    pub fn issue(&self, name: &str) -> Option<&MaterialIssue> {
        self.material_issues.iter().find(|i| i.name == name)
    }

    /// Actions that reference a metric.
    pub fn actions_for_metric<'a>(&'a self, metric: &'a str) -> impl Iterator<Item = &'a Action> {
        self.actions
            .iter()
            .filter(move |a| a.related_metrics.contains(metric))
    }

    /// Report history, oldest first.
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn latest_report(&self) -> Option<&Report> {
        self.reports.last()
    }

    /// Append a report to the history.
    pub fn record_report(&mut self, report: Report) {
        self.reports.push(report);
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.schema_version == 0 || self.schema_version > SCHEMA_VERSION {
            return Err(EsgError::validation(format!(
                "unsupported schema version {} (supported: 1..={})",
                self.schema_version, SCHEMA_VERSION
            )));
        }
        if self.name.trim().is_empty() {
            return Err(EsgError::validation("organization name is empty"));
        }
        if let Some(s) = self.stakeholders.iter().position(|s| s.name.trim().is_empty()) {
            return Err(EsgError::validation(format!("stakeholder #{} has an empty name", s + 1)));
        }
        if let Some(m) = self.metrics.iter().position(|m| m.name.trim().is_empty()) {
            return Err(EsgError::validation(format!("metric #{} has an empty name", m + 1)));
        }
        for metric in &self.metrics {
            let values = [metric.current_value, metric.target_value];
            if values.into_iter().flatten().any(|v| !v.is_finite()) {
                return Err(EsgError::validation(format!(
                    "metric {} has a non-finite value",
                    metric.name
                )));
            }
        }
        if let Some(a) = self.actions.iter().position(|a| a.name.trim().is_empty()) {
            return Err(EsgError::validation(format!("action #{} has an empty name", a + 1)));
        }

        let mut seen = HashSet::new();
        for issue in &self.material_issues {
            if issue.name.trim().is_empty() {
                return Err(EsgError::validation("material issue has an empty name"));
            }
            if !seen.insert(issue.name.as_str()) {
                return Err(EsgError::validation(format!(
                    "duplicate material issue: {}",
                    issue.name
                )));
            }
        }
        Ok(())
    }
}

fn non_empty(field: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        Err(EsgError::validation(format!("{field} must not be empty")))
    } else {
        Ok(value)
    }
}
