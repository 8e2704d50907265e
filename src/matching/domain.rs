use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for catalogue records (grants, subsidies, consultants).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub String);

/// Identifier wrapper for account holders owning a saved business profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Funding opportunity published by a council, devolved government, or utility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grant {
    pub id: RecordId,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sectors: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub location_scope: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub grant_type: String,
    pub amount_max: Option<f64>,
    pub deadline: Option<NaiveDate>,
    #[serde(deserialize_with = "null_as_default")]
    pub eligibility_text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub whats_covered: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_active: bool,
}

/// Tax relief, rate reduction, or other ongoing financial support.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subsidy {
    pub id: RecordId,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subsidy_type: SubsidyType,
    #[serde(deserialize_with = "null_as_default")]
    pub location_scope: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub value_description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub eligibility_text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum SubsidyType {
    TaxRelief,
    RateReduction,
    Loan,
    Voucher,
    Rebate,
    #[default]
    Other,
}

impl SubsidyType {
    /// Display label used when composing match reasons.
    pub fn label(&self) -> &'static str {
        match self {
            SubsidyType::TaxRelief => "Tax Relief",
            SubsidyType::RateReduction => "Business Rates Reduction",
            SubsidyType::Loan => "Green Loan",
            SubsidyType::Voucher => "Business Voucher",
            SubsidyType::Rebate => "Energy Rebate",
            SubsidyType::Other => "Subsidy",
        }
    }
}

impl From<String> for SubsidyType {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "tax_relief" => Self::TaxRelief,
            "rate_reduction" | "rates_reduction" | "business_rates" => Self::RateReduction,
            "loan" => Self::Loan,
            "voucher" => Self::Voucher,
            "rebate" => Self::Rebate,
            _ => Self::Other,
        }
    }
}

/// Sustainability professional listed in the marketplace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Consultant {
    pub id: RecordId,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub specialty: String,
    #[serde(deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(deserialize_with = "null_as_default")]
    pub verified: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub status: ConsultantStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ConsultantStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl From<String> for ConsultantStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Pending,
        }
    }
}

/// Saved account profile for a business.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessProfile {
    pub company_name: Option<String>,
    pub sector: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub employee_count: Option<String>,
    pub location: Option<String>,
    pub postcode: Option<String>,
    pub assessment: Option<AssessmentAnswers>,
}

/// Answers captured by the self-assessment flow, possibly by an anonymous visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentAnswers {
    pub sector: Option<String>,
    #[serde(deserialize_with = "loose_text")]
    pub employee_count: Option<String>,
    pub location: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub barriers: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub feature_interests: BTreeMap<String, i64>,
}

/// Headcount bands used by subsidy eligibility rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EmployeeBand {
    #[serde(rename = "1-9")]
    Micro,
    #[serde(rename = "10-49")]
    Small,
    #[serde(rename = "50-249")]
    Medium,
    #[serde(rename = "250+")]
    Large,
}

impl EmployeeBand {
    pub fn from_headcount(count: u32) -> Self {
        match count {
            0..=9 => Self::Micro,
            10..=49 => Self::Small,
            50..=249 => Self::Medium,
            _ => Self::Large,
        }
    }

    /// Accepts a headcount (`"12"`), a band label (`"10-49"`, `"250+"`), or a size word.
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim().to_ascii_lowercase().replace(' ', "");
        if value.is_empty() {
            return None;
        }

        if let Ok(count) = value.parse::<u32>() {
            return Some(Self::from_headcount(count));
        }

        match value.as_str() {
            "micro" | "sole" | "soletrader" => return Some(Self::Micro),
            "small" | "sme" => return Some(Self::Small),
            "medium" | "mid" | "midsize" | "medium-sized" => return Some(Self::Medium),
            "large" | "enterprise" => return Some(Self::Large),
            _ => {}
        }

        // Ranges such as "10-49" or "250+" resolve on their lower bound.
        let lower: String = value.chars().take_while(char::is_ascii_digit).collect();
        lower.parse::<u32>().ok().map(Self::from_headcount)
    }

    /// Size wording as it appears in eligibility text.
    pub fn size_word(&self) -> &'static str {
        match self {
            EmployeeBand::Micro => "micro",
            EmployeeBand::Small => "small",
            EmployeeBand::Medium => "medium-sized",
            EmployeeBand::Large => "large",
        }
    }
}

/// A record enriched with its ephemeral match score and reasons.
///
/// Serialises flat so UI clients see the record fields next to `matchScore`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matched<T> {
    #[serde(flatten)]
    pub record: T,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
    #[serde(rename = "goodMatch")]
    pub good_match: bool,
}

pub type MatchedGrant = Matched<Grant>;
pub type MatchedSubsidy = Matched<Subsidy>;
pub type MatchedConsultant = Matched<Consultant>;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseText {
    Text(String),
    Number(u64),
}

fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<LooseText>::deserialize(deserializer)?;
    Ok(match value {
        Some(LooseText::Text(text)) => Some(text).filter(|text| !text.trim().is_empty()),
        Some(LooseText::Number(count)) => Some(count.to_string()),
        None => None,
    })
}
