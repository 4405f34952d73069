//! JSON persistence for organization profiles.
//!
//! A profile is always written and read as one document. Writes land in a
//! sibling temporary file that is renamed over the target. There is no
//! locking: concurrent writers to one path are last-writer-wins.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::config::EsgConfig;
use crate::error::{EsgError, Result};
use crate::types::Organization;

const ORGANIZATION_FIELDS: &[&str] = &[
    "schema_version",
    "name",
    "vision",
    "stakeholders",
    "material_issues",
    "metrics",
    "actions",
    "reports",
];
const VISION_FIELDS: &[&str] = &[
    "statement",
    "vision_statement",
    "environmental_goals",
    "social_goals",
    "governance_goals",
];
const STAKEHOLDER_FIELDS: &[&str] = &["name", "category", "influence_level", "expectations"];
const ISSUE_FIELDS: &[&str] = &[
    "name",
    "category",
    "importance_to_business",
    "importance_to_stakeholders",
    "description",
    "materiality_score",
];
const METRIC_FIELDS: &[&str] = &[
    "name",
    "category",
    "unit",
    "current_value",
    "target_value",
    "data_source",
];
const ACTION_FIELDS: &[&str] = &[
    "name",
    "description",
    "responsible_party",
    "timeline",
    "resources_required",
    "status",
    "related_metrics",
];
const REPORT_FIELDS: &[&str] = &["title", "framework", "date", "content"];

/// Reads and writes organization documents under a base directory.
#[derive(Debug, Clone)]
pub struct OrganizationStore {
    base_path: PathBuf,
    reject_unknown_fields: bool,
    pretty: bool,
}

impl OrganizationStore {
    /// Create a store rooted at `base_path`, ignoring unknown fields.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            reject_unknown_fields: false,
            pretty: true,
        }
    }

    /// Create a store from configuration.
    pub fn from_config(config: &EsgConfig) -> Self {
        Self {
            base_path: config.data_path.clone(),
            reject_unknown_fields: config.persistence.reject_unknown_fields,
            pretty: config.persistence.pretty,
        }
    }

    /// Fail loads on fields the organization shape does not know.
    pub fn reject_unknown_fields(mut self, reject: bool) -> Self {
        self.reject_unknown_fields = reject;
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Absolute paths pass through; relative paths are joined to the base.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_path.join(path)
        }
    }

    /// Default document path for an organization name.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.base_path.join(document_file_name(name))
    }

    /// Load an organization document.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Organization> {
        let path = self.resolve(path);
        if !path.exists() {
            return Err(EsgError::NotFound(path));
        }

        let raw = fs::read_to_string(&path)?;
        let organization = self.parse(&raw)?;

        debug!(
            organization = %organization.name,
            path = %path.display(),
            "Loaded organization"
        );
        Ok(organization)
    }

    /// Parse an organization document from a JSON string.
    pub fn parse(&self, raw: &str) -> Result<Organization> {
        let value: Value = serde_json::from_str(raw)?;
        if self.reject_unknown_fields {
            check_unknown_fields(&value)?;
        }

        let organization: Organization = serde_json::from_value(value)?;
        organization
            .validate()
            .map_err(|e| EsgError::MalformedData(e.to_string()))?;
        Ok(organization)
    }

    /// Write the whole organization, replacing any existing document.
    ///
    /// The organization is validated first, so nothing is written that
    /// would not load back unchanged. Returns the path written.
    pub fn save(&self, organization: &Organization, path: impl AsRef<Path>) -> Result<PathBuf> {
        organization.validate()?;
        let path = self.resolve(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = if self.pretty {
            serde_json::to_string_pretty(organization)?
        } else {
            serde_json::to_string(organization)?
        };

        let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        tmp_name.push(".tmp");
        let tmp = path.with_file_name(tmp_name);

        if let Err(e) = fs::write(&tmp, json).and_then(|_| fs::rename(&tmp, &path)) {
            fs::remove_file(&tmp).ok();
            return Err(e.into());
        }

        info!(
            organization = %organization.name,
            path = %path.display(),
            reports = organization.reports().len(),
            "Saved organization"
        );
        Ok(path)
    }

    /// Save to the default document path for the organization's name.
    pub fn save_default(&self, organization: &Organization) -> Result<PathBuf> {
        self.save(organization, self.path_for(&organization.name))
    }

    /// Load the organization's default document, or start an empty profile.
    ///
    /// A missing or empty file yields a new profile; a malformed one is an error.
    pub fn load_or_create(&self, name: &str) -> Result<Organization> {
        let path = self.path_for(name);
        let has_content = fs::metadata(&path).map(|m| m.len() > 0).unwrap_or(false);

        if has_content {
            return self.load(&path);
        }

        info!(organization = %name, "Creating new ESG profile");
        Organization::new(name)
    }
}

/// Load an organization document with default options.
pub fn load(path: impl AsRef<Path>) -> Result<Organization> {
    OrganizationStore::new("").load(path)
}

/// Save an organization document with default options.
pub fn save(organization: &Organization, path: impl AsRef<Path>) -> Result<PathBuf> {
    OrganizationStore::new("").save(organization, path)
}

/// `GreenTech Solutions` -> `greentech_solutions_esg_data.json`
///
/// Spaces become underscores; path separators do too, so the name never
/// leaves the store's directory.
pub fn document_file_name(name: &str) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();
    format!("{}_esg_data.json", slug)
}

fn check_unknown_fields(document: &Value) -> Result<()> {
    check_object(document, "organization", ORGANIZATION_FIELDS)?;

    if let Some(vision) = document.get("vision").filter(|v| !v.is_null()) {
        check_object(vision, "vision", VISION_FIELDS)?;
    }

    let nested: [(&str, &[&str]); 5] = [
        ("stakeholders", STAKEHOLDER_FIELDS),
        ("material_issues", ISSUE_FIELDS),
        ("metrics", METRIC_FIELDS),
        ("actions", ACTION_FIELDS),
        ("reports", REPORT_FIELDS),
    ];
    for (key, fields) in nested {
        if let Some(Value::Array(items)) = document.get(key) {
            for (i, item) in items.iter().enumerate() {
                check_object(item, &format!("{}[{}]", key, i), fields)?;
            }
        }
    }
    Ok(())
}

fn check_object(value: &Value, context: &str, known: &[&str]) -> Result<()> {
    if let Value::Object(map) = value {
        if let Some(unknown) = map.keys().find(|k| !known.contains(&k.as_str())) {
            return Err(EsgError::MalformedData(format!(
                "unknown field `{}` in {}",
                unknown, context
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EsgCategory, MaterialIssue, Metric, Stakeholder};

    #[test]
    fn test_document_file_name() {
        assert_eq!(
            document_file_name("GreenTech Solutions"),
            "greentech_solutions_esg_data.json"
        );
        assert_eq!(
            document_file_name("Eco Manufacturing Inc."),
            "eco_manufacturing_inc._esg_data.json"
        );
        assert_eq!(
            document_file_name("Acme/../etc"),
            "acme_.._etc_esg_data.json"
        );
    }

    #[test]
    fn test_resolve() {
        let store = OrganizationStore::new("/data/esg");
        assert_eq!(store.resolve("acme.json"), PathBuf::from("/data/esg/acme.json"));
        assert_eq!(store.resolve("/tmp/acme.json"), PathBuf::from("/tmp/acme.json"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = OrganizationStore::new(dir.path());
        assert!(matches!(store.load("nope.json"), Err(EsgError::NotFound(_))));
    }

    #[test]
    fn test_malformed_json() {
        let store = OrganizationStore::new("");
        assert!(matches!(store.parse("{ not json"), Err(EsgError::MalformedData(_))));
        assert!(matches!(
            store.parse(r#"{"stakeholders": []}"#),
            Err(EsgError::MalformedData(msg)) if msg.contains("name")
        ));
        assert!(matches!(store.parse(r#"{"name": ""}"#), Err(EsgError::MalformedData(_))));
    }

    #[test]
    fn test_out_of_range_rating_is_malformed() {
        let raw = r#"{
            "name": "Acme",
            "material_issues": [{
                "name": "Water",
                "category": "Environmental",
                "importance_to_business": 11,
                "importance_to_stakeholders": 5
            }]
        }"#;
        assert!(matches!(
            OrganizationStore::new("").parse(raw),
            Err(EsgError::MalformedData(_))
        ));
    }

    #[test]
    fn test_unknown_fields() {
        let raw = r#"{"name": "Acme", "stakeholders": [
            {"name": "Staff", "category": "Internal", "influence_level": 6, "mood": "ok"}
        ]}"#;

        let lenient = OrganizationStore::new("");
        assert_eq!(lenient.parse(raw).unwrap().stakeholders.len(), 1);

        let strict = OrganizationStore::new("").reject_unknown_fields(true);
        let err = strict.parse(raw).unwrap_err();
        assert!(matches!(err, EsgError::MalformedData(msg) if msg.contains("mood")));
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = OrganizationStore::new(dir.path());

        let mut org = Organization::new("Acme Corp").unwrap();
        org.stakeholders
            .push(Stakeholder::new("Investors", "Investor", 9).unwrap().expects("Disclosure"));
        org.material_issues
            .push(MaterialIssue::new("Carbon", EsgCategory::Environmental, 9, 10).unwrap());
        org.assess_materiality();

        let path = store.save(&org, "nested/acme.json").unwrap();
        assert_eq!(path, dir.path().join("nested/acme.json"));
        assert_eq!(store.load(&path).unwrap(), org);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = OrganizationStore::new(dir.path());

        let first = Organization::new("Acme").unwrap();
        let mut second = first.clone();
        second
            .stakeholders
            .push(Stakeholder::new("Staff", "Internal", 6).unwrap());

        store.save_default(&first).unwrap();
        let path = store.save_default(&second).unwrap();

        assert_eq!(store.load(path).unwrap(), second);
        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_non_finite_values_are_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let store = OrganizationStore::new(dir.path());

        let mut org = Organization::new("Acme").unwrap();
        org.metrics.push(
            Metric::new("Water", EsgCategory::Environmental, "m3")
                .unwrap()
                .with_current(f64::INFINITY),
        );

        assert!(matches!(store.save_default(&org), Err(EsgError::Validation(_))));
        assert!(!store.path_for("Acme").exists());
    }

    #[test]
    fn test_failed_save_removes_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = OrganizationStore::new(dir.path());
        // A directory in the target's place makes the final rename fail
        fs::create_dir(dir.path().join("acme.json")).unwrap();

        let org = Organization::new("Acme").unwrap();
        assert!(matches!(store.save(&org, "acme.json"), Err(EsgError::Io(_))));
        assert!(!dir.path().join("acme.json.tmp").exists());
    }

    #[test]
    fn test_load_or_create() {
        let dir = tempfile::tempdir().unwrap();
        let store = OrganizationStore::new(dir.path());

        let fresh = store.load_or_create("TechInnovate").unwrap();
        assert_eq!(fresh.name, "TechInnovate");
        assert!(fresh.stakeholders.is_empty());

        fs::write(store.path_for("Empty Co"), "").unwrap();
        assert_eq!(store.load_or_create("Empty Co").unwrap().name, "Empty Co");

        fs::write(store.path_for("Broken Co"), "{").unwrap();
        assert!(matches!(
            store.load_or_create("Broken Co"),
            Err(EsgError::MalformedData(_))
        ));
    }
}
