//! Sample organizations at different stages of an ESG program.
//!
//! - [`greentech_solutions`]: full profile with vision, metrics and actions
//! - [`eco_manufacturing`]: assessment phase, stakeholders only
//! - [`techinnovate`]: strategy phase, no actions yet

use crate::error::Result;
use crate::types::{
    ActionBuilder, ActionStatus, EsgCategory, MaterialIssue, Metric, Organization, Stakeholder,
    Vision,
};

use EsgCategory::{Environmental, Governance, Social};

type StakeholderRow<'a> = (&'a str, &'a str, u8, &'a [&'a str]);
type IssueRow<'a> = (&'a str, EsgCategory, u8, u8, &'a str);
type MetricRow<'a> = (&'a str, EsgCategory, &'a str, f64, f64, &'a str);

/// Fully populated profile for a fictional technology company.
pub fn greentech_solutions() -> Result<Organization> {
    let vision = Vision::new(
        "To become a carbon-neutral technology company by 2030 while creating positive social \
         impact and maintaining the highest standards of corporate governance.",
    )
    .goal(Environmental, "Reduce carbon emissions by 50% by 2025 and 100% by 2030")
    .goal(Environmental, "Achieve zero waste to landfill across all operations by 2027")
    .goal(Environmental, "Transition to 100% renewable energy by 2026")
    .goal(Environmental, "Reduce water consumption by 30% by 2025")
    .goal(Social, "Achieve gender parity across all levels of the organization by 2026")
    .goal(Social, "Ensure all employees earn at least a living wage")
    .goal(Social, "Implement a comprehensive supplier diversity program")
    .goal(Social, "Contribute 1% of profits to community development initiatives")
    .goal(
        Governance,
        "Maintain a diverse board with at least 40% representation from underrepresented groups",
    )
    .goal(Governance, "Implement a robust ESG risk management framework")
    .goal(Governance, "Ensure 100% compliance with all applicable regulations")
    .goal(Governance, "Achieve top-quartile ESG ratings from major rating agencies");

    let mut org = Organization::new("GreenTech Solutions")?.with_vision(vision);

    org.stakeholders = stakeholders(&[
        (
            "Institutional Investors",
            "Investor",
            9,
            &["Transparent ESG disclosure", "Climate risk management", "Long-term value creation"],
        ),
        (
            "Enterprise Customers",
            "Customer",
            8,
            &["Sustainable product offerings", "Responsible supply chain management"],
        ),
        (
            "Employees",
            "Internal",
            7,
            &["Diverse and inclusive workplace", "Professional development opportunities"],
        ),
        ("Local Communities", "Community", 6, &["Job creation", "Environmental stewardship"]),
        (
            "Regulatory Bodies",
            "Regulator",
            9,
            &["Compliance with environmental regulations", "Transparent reporting"],
        ),
        (
            "NGOs and Advocacy Groups",
            "Civil Society",
            5,
            &["Climate action", "Human rights protection"],
        ),
    ])?;

    org.material_issues = issues(&[
        (
            "Carbon Emissions",
            Environmental,
            9,
            10,
            "Direct and indirect greenhouse gas emissions from operations and value chain.",
        ),
        (
            "Energy Management",
            Environmental,
            8,
            7,
            "Energy consumption, efficiency, and transition to renewable sources.",
        ),
        (
            "Water Management",
            Environmental,
            6,
            5,
            "Water usage, efficiency, and impact on water-stressed areas.",
        ),
        (
            "Waste and Hazardous Materials",
            Environmental,
            7,
            6,
            "Generation, management, and disposal of waste and hazardous materials.",
        ),
        (
            "Diversity and Inclusion",
            Social,
            8,
            9,
            "Workforce diversity, equity, and inclusion across all levels.",
        ),
        (
            "Labor Practices",
            Social,
            7,
            8,
            "Fair compensation, benefits, working conditions, and labor rights.",
        ),
        ("Community Relations", Social, 6, 7, "Engagement with and impact on local communities."),
        (
            "Product Quality and Safety",
            Social,
            9,
            9,
            "Ensuring products meet quality standards and are safe for customers.",
        ),
        (
            "Data Privacy and Security",
            Governance,
            10,
            10,
            "Protection of customer data and information security practices.",
        ),
        (
            "Business Ethics",
            Governance,
            9,
            9,
            "Anti-corruption, anti-bribery, and ethical business conduct.",
        ),
        (
            "Board Diversity and Structure",
            Governance,
            7,
            8,
            "Diversity, independence, and expertise of the board of directors.",
        ),
        (
            "ESG Governance",
            Governance,
            8,
            7,
            "Oversight and management of ESG issues at the board and executive levels.",
        ),
    ])?;

    org.metrics = metrics(&[
        (
            "Scope 1 GHG Emissions",
            Environmental,
            "tCO2e",
            15000.0,
            7500.0,
            "Energy consumption records",
        ),
        (
            "Scope 2 GHG Emissions",
            Environmental,
            "tCO2e",
            22000.0,
            11000.0,
            "Utility bills and energy supplier data",
        ),
        (
            "Renewable Energy Percentage",
            Environmental,
            "%",
            35.0,
            100.0,
            "Energy procurement contracts",
        ),
        (
            "Water Consumption",
            Environmental,
            "cubic meters",
            45000.0,
            31500.0,
            "Water utility bills",
        ),
        ("Waste Diversion Rate", Environmental, "%", 65.0, 100.0, "Waste management records"),
        ("Gender Diversity - Management", Social, "% women", 32.0, 50.0, "HR records"),
        ("Gender Diversity - Board", Social, "% women", 30.0, 50.0, "Board records"),
        ("Employee Satisfaction", Social, "score out of 5", 3.8, 4.5, "Annual employee survey"),
        ("Community Investment", Social, "% of profit", 0.5, 1.0, "Financial records"),
        ("Supplier Diversity", Social, "% diverse suppliers", 15.0, 30.0, "Procurement records"),
        ("Board Independence", Governance, "% independent directors", 75.0, 80.0, "Board records"),
        (
            "Ethics Training Completion",
            Governance,
            "% employees trained",
            90.0,
            100.0,
            "Training records",
        ),
        ("Data Breaches", Governance, "number per year", 1.0, 0.0, "Security incident reports"),
        (
            "ESG Disclosure Score",
            Governance,
            "score out of 100",
            68.0,
            90.0,
            "ESG rating agency reports",
        ),
    ])?;

    org.actions = vec![
        ActionBuilder::new("Carbon Reduction Program")
            .description(
                "Implement energy efficiency measures and transition to \
                 renewable energy across all facilities.",
            )
            .responsible_party("Sustainability Team")
            .timeline("2023-2026")
            .resources_required("$2.5M budget, dedicated project manager, external consultants")
            .status(ActionStatus::InProgress)
            .related_metric("Scope 1 GHG Emissions")
            .related_metric("Scope 2 GHG Emissions")
            .related_metric("Renewable Energy Percentage")
            .build()?,
        ActionBuilder::new("Zero Waste Initiative")
            .description(
                "Implement waste reduction, recycling, and composting \
                 programs to eliminate waste to landfill.",
            )
            .responsible_party("Facilities Management")
            .timeline("2023-2027")
            .resources_required("$800K budget, waste management consultant, employee training")
            .status(ActionStatus::PlanningPhase)
            .related_metric("Waste Diversion Rate")
            .build()?,
        ActionBuilder::new("Diversity and Inclusion Program")
            .description(
                "Comprehensive D&I strategy including recruitment, \
                 retention, and advancement initiatives.",
            )
            .responsible_party("HR Department")
            .timeline("2023-2026")
            .resources_required("$1.2M budget, D&I specialist, training resources")
            .status(ActionStatus::InProgress)
            .related_metric("Gender Diversity - Management")
            .related_metric("Gender Diversity - Board")
            .related_metric("Employee Satisfaction")
            .build()?,
        ActionBuilder::new("Enhanced ESG Governance Structure")
            .description(
                "Establish board ESG committee, executive ESG council, and \
                 formal ESG reporting process.",
            )
            .responsible_party("Corporate Secretary")
            .timeline("2023")
            .resources_required("Board and executive time, governance consultant")
            .status(ActionStatus::Completed)
            .related_metric("ESG Disclosure Score")
            .related_metric("Board Independence")
            .build()?,
        ActionBuilder::new("Cybersecurity Enhancement Program")
            .description(
                "Strengthen data protection through improved systems, \
                 processes, and employee training.",
            )
            .responsible_party("IT Security Team")
            .timeline("2023-2024")
            .resources_required("$1.5M budget, security consultants, training materials")
            .status(ActionStatus::InProgress)
            .related_metric("Data Breaches")
            .related_metric("Ethics Training Completion")
            .build()?,
    ];

    Ok(org)
}

/// Assessment-phase profile: stakeholders identified, nothing else yet.
pub fn eco_manufacturing() -> Result<Organization> {
    let mut org = Organization::new("Eco Manufacturing Inc.")?;
    org.stakeholders = stakeholders(&[
        ("Investors", "Investor", 8, &["ESG performance", "Risk management"]),
        ("Customers", "Customer", 7, &["Sustainable products", "Ethical practices"]),
    ])?;
    Ok(org)
}

/// Strategy-phase profile: vision, issues and first metrics, no actions.
pub fn techinnovate() -> Result<Organization> {
    let vision = Vision::new(
        "To lead technology innovation with environmental and social responsibility.",
    )
    .goal(Environmental, "Carbon neutral by 2030")
    .goal(Environmental, "Zero waste operations")
    .goal(Social, "Diverse workforce")
    .goal(Social, "Ethical supply chain")
    .goal(Governance, "Transparent reporting")
    .goal(Governance, "Ethical leadership");

    let mut org = Organization::new("TechInnovate")?.with_vision(vision);
    org.stakeholders = stakeholders(&[
        (
            "Shareholders",
            "Investor",
            9,
            &["Long-term growth", "ESG risk management", "Transparent disclosure"],
        ),
        ("B2B Customers", "Customer", 8, &["Innovative solutions", "Sustainable products"]),
        ("Employees", "Internal", 7, &["Inclusive culture", "Career growth"]),
        ("Regulators", "Regulator", 8, &["Compliance", "Responsible AI", "Data protection"]),
    ])?;
    org.material_issues = issues(&[
        ("Climate Impact", Environmental, 8, 9, "Carbon footprint of operations and products."),
        ("Talent Diversity", Social, 7, 8, "Diversity in workforce and leadership."),
        ("Data Security", Governance, 9, 9, "Protection of sensitive customer and business data."),
    ])?;
    org.metrics = metrics(&[
        ("Carbon Footprint", Environmental, "tCO2e", 12000.0, 0.0, "Energy consumption data"),
        ("Gender Diversity", Social, "% women in leadership", 28.0, 50.0, "HR records"),
    ])?;
    Ok(org)
}

fn stakeholders(rows: &[StakeholderRow<'_>]) -> Result<Vec<Stakeholder>> {
    rows.iter()
        .map(|&(name, category, influence, expectations)| {
            let stakeholder = Stakeholder::new(name, category, influence)?;
            Ok(expectations.iter().fold(stakeholder, |s, e| s.expects(*e)))
        })
        .collect()
}

fn issues(rows: &[IssueRow<'_>]) -> Result<Vec<MaterialIssue>> {
    rows.iter()
        .map(|&(name, category, business, stakeholders, description)| {
            Ok(MaterialIssue::new(name, category, business, stakeholders)?.described(description))
        })
        .collect()
}

fn metrics(rows: &[MetricRow<'_>]) -> Result<Vec<Metric>> {
    rows.iter()
        .map(|&(name, category, unit, current, target, source)| {
            Ok(Metric::new(name, category, unit)?
                .with_current(current)
                .with_target(target)
                .sourced_from(source))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_valid() {
        for org in [greentech_solutions(), eco_manufacturing(), techinnovate()] {
            org.unwrap().validate().unwrap();
        }
    }

    #[test]
    fn test_greentech_profile() {
        let org = greentech_solutions().unwrap();
        assert_eq!(org.stakeholders.len(), 6);
        assert_eq!(org.material_issues.len(), 12);
        assert_eq!(org.metrics_in(Governance).count(), 4);
        assert_eq!(org.actions_for_metric("Data Breaches").count(), 1);
        assert!(org.vision.is_some());
    }

    #[test]
    fn test_phase_samples() {
        let eco = eco_manufacturing().unwrap();
        assert!(eco.vision.is_none());
        assert!(eco.material_issues.is_empty());

        let tech = techinnovate().unwrap();
        assert!(tech.actions.is_empty());
        assert_eq!(tech.material_issues.len(), 3);
    }
}
