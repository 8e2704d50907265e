use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::local::LocalSnapshot;
use crate::matching::{Consultant, ConsultantStatus, Grant, RecordId, Subsidy, SubsidyType};

fn list(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn grant(
    id: &str,
    name: &str,
    description: &str,
    sectors: &[&str],
    location_scope: &[&str],
    grant_type: &str,
    amount_max: Option<f64>,
    deadline: Option<NaiveDate>,
    whats_covered: &[&str],
) -> Grant {
    Grant {
        id: RecordId(id.to_string()),
        name: name.to_string(),
        description: description.to_string(),
        sectors: list(sectors),
        location_scope: list(location_scope),
        grant_type: grant_type.to_string(),
        amount_max,
        deadline,
        eligibility_text: "SMEs with fewer than 250 employees trading for at least 12 months"
            .to_string(),
        whats_covered: list(whats_covered),
        is_active: true,
    }
}

fn subsidy(
    id: &str,
    name: &str,
    subsidy_type: SubsidyType,
    location_scope: &[&str],
    value_description: &str,
    eligibility_text: &str,
) -> Subsidy {
    Subsidy {
        id: RecordId(id.to_string()),
        name: name.to_string(),
        description: format!("{name} for businesses investing in lower-carbon operations"),
        subsidy_type,
        location_scope: list(location_scope),
        value_description: value_description.to_string(),
        eligibility_text: eligibility_text.to_string(),
        is_active: true,
    }
}

fn consultant(id: &str, name: &str, specialty: &str, region: &str, verified: bool) -> Consultant {
    Consultant {
        id: RecordId(id.to_string()),
        name: name.to_string(),
        specialty: specialty.to_string(),
        region: region.to_string(),
        verified,
        status: ConsultantStatus::Approved,
    }
}

/// Built-in UK catalogue served when no local snapshot is configured.
pub fn seed_snapshot() -> LocalSnapshot {
    let grants = vec![
        grant(
            "grant-green-growth",
            "Green Growth Fund",
            "Capital funding for energy efficiency upgrades in small manufacturers",
            &["Manufacturing", "Engineering"],
            &["North West", "Greater Manchester"],
            "Capital grant",
            Some(25_000.0),
            NaiveDate::from_ymd_opt(2026, 3, 31),
            &["LED lighting", "Energy efficiency equipment", "Heat pumps"],
        ),
        grant(
            "grant-net-zero-accelerator",
            "Net Zero Accelerator",
            "Match funding for SMEs adopting renewable energy",
            &["All sectors"],
            &["UK"],
            "Match funding",
            Some(10_000.0),
            None,
            &["Solar panels", "Battery storage", "Installation"],
        ),
        grant(
            "grant-low-carbon-hospitality",
            "Low Carbon Hospitality Scheme",
            "Support for hotels, pubs, and restaurants cutting kitchen and heating emissions",
            &["Hospitality", "Food and drink"],
            &["London"],
            "Capital grant",
            Some(15_000.0),
            NaiveDate::from_ymd_opt(2026, 6, 30),
            &["Kitchen equipment", "Heating controls", "Insulation"],
        ),
        grant(
            "grant-scottish-sme-loan",
            "SME Energy Efficiency Support",
            "Advice and capital support for Scottish businesses",
            &["Any sector"],
            &["Scotland"],
            "Advice and capital",
            Some(100_000.0),
            None,
            &["Energy audit", "Advice", "Equipment"],
        ),
        grant(
            "grant-carbon-reporting",
            "Carbon Reporting Readiness Voucher",
            "Funded consultancy to build a first carbon footprint report",
            &["Professional services", "Retail"],
            &["England"],
            "Consultancy voucher",
            Some(3_000.0),
            NaiveDate::from_ymd_opt(2026, 1, 15),
            &["Carbon reporting", "Consultancy", "Training"],
        ),
        grant(
            "grant-fleet-ev",
            "Workplace Fleet Charging Grant",
            "Contribution towards electric vehicle charge points for company fleets",
            &["Logistics", "Transport"],
            &["UK"],
            "Capital grant",
            Some(14_000.0),
            None,
            &["EV charge points", "Fleet electrification", "Installation"],
        ),
    ];

    let subsidies = vec![
        subsidy(
            "subsidy-full-expensing",
            "Capital Allowances on Green Plant",
            SubsidyType::TaxRelief,
            &["UK"],
            "100% first-year allowance on qualifying plant",
            "Available to all businesses paying corporation tax",
        ),
        subsidy(
            "subsidy-rates-relief",
            "Business Rates Green Improvement Relief",
            SubsidyType::RateReduction,
            &["England"],
            "12 months relief on rateable value increases from green upgrades",
            "Small and medium-sized businesses occupying non-domestic property",
        ),
        subsidy(
            "subsidy-green-loan",
            "Green SME Loan",
            SubsidyType::Loan,
            &["Wales"],
            "Loans up to £1.5m at reduced interest",
            "Manufacturing and hospitality SMEs based in Wales",
        ),
        subsidy(
            "subsidy-heat-voucher",
            "Heat Network Voucher",
            SubsidyType::Voucher,
            &["Scotland"],
            "Up to £5,000 towards a heat network feasibility study",
            "Micro and small businesses in Scotland",
        ),
        subsidy(
            "subsidy-energy-rebate",
            "Energy Bills Rebate for Energy-Intensive Industries",
            SubsidyType::Rebate,
            &["UK"],
            "Discount on wholesale energy costs",
            "Large manufacturing businesses in energy-intensive industries",
        ),
    ];

    let consultants = vec![
        consultant(
            "consultant-northern-audits",
            "Northern Energy Audits",
            "Energy Auditors",
            "North West",
            true,
        ),
        consultant(
            "consultant-capital-carbon",
            "Capital Carbon Accounting",
            "Carbon Accountants",
            "London",
            true,
        ),
        consultant(
            "consultant-greenpath",
            "GreenPath Advisory",
            "Sustainability Consultants",
            "UK",
            false,
        ),
        consultant(
            "consultant-celtic-solar",
            "Celtic Solar Installers",
            "Renewable Energy Installers",
            "Wales",
            true,
        ),
        consultant(
            "consultant-grantwise",
            "Grantwise",
            "Grant Writers",
            "England",
            false,
        ),
        consultant(
            "consultant-highland-energy",
            "Highland Energy Efficiency",
            "Energy Efficiency Specialists",
            "Scotland",
            true,
        ),
    ];

    LocalSnapshot {
        grants,
        subsidies,
        consultants,
        profiles: BTreeMap::new(),
    }
}
