//! Stakeholder prioritization and materiality scoring.
//!
//! All functions are deterministic and stable: records with equal keys keep
//! their original relative order.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{EsgCategory, MaterialIssue, Organization, Stakeholder};

/// Default number of issues reported as top priorities.
pub const DEFAULT_TOP_PRIORITIES: usize = 5;

/// Stakeholders ordered by influence, highest first.
///
/// Returns an empty list for empty input. The input is not modified.
pub fn rank_stakeholders(stakeholders: &[Stakeholder]) -> Vec<Stakeholder> {
    let mut ranked = stakeholders.to_vec();
    ranked.sort_by_key(|s| Reverse(s.influence_level));
    ranked
}

/// Materiality score of one issue: mean of business and stakeholder importance.
pub fn materiality_score(issue: &MaterialIssue) -> f64 {
    (f64::from(issue.importance_to_business.get())
        + f64::from(issue.importance_to_stakeholders.get()))
        / 2.0
}

/// Score every issue in place and return them ordered by score.
///
/// Any previous score is overwritten, so scoring twice gives the same result.
pub fn score_materiality(issues: &mut [MaterialIssue]) -> MaterialityAssessment {
    for issue in issues.iter_mut() {
        issue.materiality_score = materiality_score(issue);
    }

    let mut ranked = issues.to_vec();
    ranked.sort_by(|a, b| b.materiality_score.total_cmp(&a.materiality_score));

    tracing::debug!(issue_count = ranked.len(), "Scored material issues");
    MaterialityAssessment { issues: ranked }
}

/// Result of a materiality assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialityAssessment {
    /// Issues, highest score first
    pub issues: Vec<MaterialIssue>,
}

impl MaterialityAssessment {
    /// Names of the `n` most material issues (all of them when fewer exist).
    pub fn top_priorities(&self, n: usize) -> Vec<&str> {
        self.issues.iter().take(n).map(|i| i.name.as_str()).collect()
    }

    /// Ranked issues of one category.
    pub fn by_category(&self, category: EsgCategory) -> Vec<&MaterialIssue> {
        self.issues.iter().filter(|i| i.category == category).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }
}

/// Average influence of one stakeholder category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfluence {
    pub category: String,
    pub stakeholder_count: usize,
    pub average_influence: f64,
}

/// Group stakeholders by category, most influential category first.
///
/// Ties on average influence are ordered by category name.
pub fn stakeholder_categories(stakeholders: &[Stakeholder]) -> Vec<CategoryInfluence> {
    let mut totals: BTreeMap<&str, (usize, u32)> = BTreeMap::new();
    for s in stakeholders {
        let entry = totals.entry(s.category.as_str()).or_default();
        entry.0 += 1;
        entry.1 += u32::from(s.influence_level.get());
    }

    let mut groups: Vec<CategoryInfluence> = totals
        .into_iter()
        .map(|(category, (count, total))| CategoryInfluence {
            category: category.to_string(),
            stakeholder_count: count,
            average_influence: f64::from(total) / count as f64,
        })
        .collect();

    // BTreeMap already yields names in order; a stable sort keeps it for ties.
    groups.sort_by(|a, b| b.average_influence.total_cmp(&a.average_influence));
    groups
}

impl Organization {
    /// Score this organization's material issues in place.
    pub fn assess_materiality(&mut self) -> MaterialityAssessment {
        score_materiality(&mut self.material_issues)
    }

    /// This organization's stakeholders ordered by influence.
    pub fn ranked_stakeholders(&self) -> Vec<Stakeholder> {
        rank_stakeholders(&self.stakeholders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(name: &str, business: u8, stakeholders: u8) -> MaterialIssue {
        MaterialIssue::new(name, EsgCategory::Environmental, business, stakeholders).unwrap()
    }

    fn stakeholder(name: &str, category: &str, influence: u8) -> Stakeholder {
        Stakeholder::new(name, category, influence).unwrap()
    }

    #[test]
    fn test_score_and_order() {
        let mut issues = vec![issue("B", 8, 7), issue("A", 9, 10)];
        let assessment = score_materiality(&mut issues);

        assert_eq!(issues[0].materiality_score, 7.5);
        assert_eq!(issues[1].materiality_score, 9.5);
        assert_eq!(assessment.top_priorities(5), vec!["A", "B"]);
        assert_eq!(assessment.top_priorities(1), vec!["A"]);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let mut issues = vec![issue("A", 9, 10), issue("B", 3, 4), issue("C", 6, 6)];
        issues[1].materiality_score = 42.0;

        let first = score_materiality(&mut issues);
        let second = score_materiality(&mut issues);

        assert_eq!(first, second);
        assert_eq!(issues[1].materiality_score, 3.5);
    }

    #[test]
    fn test_ties_keep_original_order() {
        let mut issues = vec![
            issue("first", 7, 8),
            issue("top", 10, 10),
            issue("second", 8, 7),
            issue("third", 9, 6),
        ];
        let assessment = score_materiality(&mut issues);

        assert_eq!(assessment.top_priorities(4), vec!["top", "first", "second", "third"]);
        for pair in assessment.issues.windows(2) {
            assert!(pair[0].materiality_score >= pair[1].materiality_score);
        }
    }

    #[test]
    fn test_top_priorities_with_fewer_issues() {
        let mut issues = vec![issue("A", 2, 2)];
        let assessment = score_materiality(&mut issues);
        assert_eq!(assessment.top_priorities(DEFAULT_TOP_PRIORITIES), vec!["A"]);
        assert!(score_materiality(&mut []).top_priorities(3).is_empty());
    }

    #[test]
    fn test_rank_stakeholders_stable() {
        let input = vec![
            stakeholder("Investors", "Investor", 9),
            stakeholder("Employees", "Internal", 7),
            stakeholder("Regulators", "Regulator", 9),
            stakeholder("NGOs", "Civil Society", 5),
        ];
        let ranked = rank_stakeholders(&input);

        let names: Vec<&str> = ranked.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Investors", "Regulators", "Employees", "NGOs"]);
        // Input untouched
        assert_eq!(input[0].name, "Investors");
        assert_eq!(input[1].name, "Employees");
    }

    #[test]
    fn test_rank_empty_stakeholders() {
        assert!(rank_stakeholders(&[]).is_empty());
    }

    #[test]
    fn test_by_category() {
        let mut issues = vec![
            issue("Carbon", 9, 10),
            MaterialIssue::new("Ethics", EsgCategory::Governance, 9, 9).unwrap(),
        ];
        let assessment = score_materiality(&mut issues);
        let governance = assessment.by_category(EsgCategory::Governance);
        assert_eq!(governance.len(), 1);
        assert_eq!(governance[0].name, "Ethics");
        assert!(assessment.by_category(EsgCategory::Social).is_empty());
    }

    #[test]
    fn test_stakeholder_categories() {
        let input = vec![
            stakeholder("Pension funds", "Investor", 10),
            stakeholder("Retail", "Investor", 5),
            stakeholder("Agency", "Regulator", 7),
            stakeholder("Staff", "Internal", 7),
        ];
        let groups = stakeholder_categories(&input);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].category, "Investor");
        assert_eq!(groups[0].stakeholder_count, 2);
        assert_eq!(groups[0].average_influence, 7.5);
        // Equal averages fall back to name order
        assert_eq!(groups[1].category, "Internal");
        assert_eq!(groups[2].category, "Regulator");
    }
}
