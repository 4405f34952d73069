//! Text results handed back to calling agents.

use esg_core::{MaterialIssue, Stakeholder};

/// Render stakeholders, already ranked, as a numbered listing.
pub fn stakeholder_analysis(ranked: &[Stakeholder]) -> String {
    if ranked.is_empty() {
        return "No stakeholders found to analyze.".to_string();
    }

    let mut out = String::from("Stakeholder Analysis Results:\n");
    for (i, s) in ranked.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} ({}) - Influence: {}/10\n",
            i + 1,
            s.name,
            s.category,
            s.influence_level
        ));
        out.push_str(&format!("   Key expectations: {}\n", s.expectations.join(", ")));
    }
    out
}

/// Render scored issues, highest score first, as a numbered listing.
pub fn materiality_assessment(issues: &[MaterialIssue]) -> String {
    if issues.is_empty() {
        return "No material issues found to assess.".to_string();
    }

    let mut out = String::from("Materiality Assessment Results:\n");
    for (i, issue) in issues.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} ({}) - Materiality Score: {:.1}/10\n",
            i + 1,
            issue.name,
            issue.category,
            issue.materiality_score
        ));
        out.push_str(&format!("   Description: {}\n", issue.description));
    }
    out
}
