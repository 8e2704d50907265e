use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::local::LocalSnapshot;
use super::seed::seed_snapshot;
use super::DataSourceError;
use crate::matching::profile::normalize_text;
use crate::matching::{Grant, RecordId};

/// Error raised while importing a grant catalogue export.
#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid grant CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: grant name is required")]
    MissingName { row: usize },
    #[error("row {row}: '{value}' is not a valid amount")]
    InvalidAmount { row: usize, value: String },
    #[error("row {row}: '{value}' is not a valid deadline (expected YYYY-MM-DD or DD/MM/YYYY)")]
    InvalidDeadline { row: usize, value: String },
    #[error(transparent)]
    Snapshot(#[from] DataSourceError),
}

/// Parses grant catalogue CSV exports into [`Grant`] records.
pub struct GrantCatalogImporter;

impl GrantCatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Grant>, CatalogImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| CatalogImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Grant>, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut used_ids: HashSet<String> = HashSet::new();
        let mut grants = Vec::new();

        for (index, record) in csv_reader.deserialize::<GrantRow>().enumerate() {
            // Header is line 1.
            let row = index + 2;
            let mut grant = record?.into_grant(row)?;
            grant.id = unique_id(&grant.name, &mut used_ids);
            grants.push(grant);
        }

        Ok(grants)
    }
}

/// Imports `csv_path` into the snapshot at `out_path`, replacing its grants.
///
/// A missing snapshot starts from the seed catalogue so subsidies and consultants remain.
pub fn import_grants_csv(
    csv_path: &Path,
    out_path: &Path,
) -> Result<LocalSnapshot, CatalogImportError> {
    let grants = GrantCatalogImporter::from_path(csv_path)?;

    let mut snapshot = match std::fs::read_to_string(out_path) {
        Ok(raw) => LocalSnapshot::from_json(&raw, out_path)?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => seed_snapshot(),
        Err(source) => {
            return Err(CatalogImportError::Io {
                path: out_path.to_path_buf(),
                source,
            })
        }
    };
    snapshot.grants = grants;

    std::fs::write(out_path, snapshot.to_json()?).map_err(|source| CatalogImportError::Io {
        path: out_path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        grants = snapshot.grants.len(),
        out = %out_path.display(),
        "imported grant catalogue"
    );
    Ok(snapshot)
}

#[derive(Debug, Deserialize)]
struct GrantRow {
    #[serde(rename = "Name", default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(rename = "Description", default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(rename = "Sectors", default, deserialize_with = "empty_string_as_none")]
    sectors: Option<String>,
    #[serde(rename = "Regions", default, deserialize_with = "empty_string_as_none")]
    regions: Option<String>,
    #[serde(rename = "Type", default, deserialize_with = "empty_string_as_none")]
    grant_type: Option<String>,
    #[serde(rename = "Max Amount", default, deserialize_with = "empty_string_as_none")]
    max_amount: Option<String>,
    #[serde(rename = "Deadline", default, deserialize_with = "empty_string_as_none")]
    deadline: Option<String>,
    #[serde(rename = "Eligibility", default, deserialize_with = "empty_string_as_none")]
    eligibility: Option<String>,
    #[serde(rename = "Covers", default, deserialize_with = "empty_string_as_none")]
    covers: Option<String>,
    #[serde(rename = "Active", default, deserialize_with = "empty_string_as_none")]
    active: Option<String>,
}

impl GrantRow {
    fn into_grant(self, row: usize) -> Result<Grant, CatalogImportError> {
        let name = self.name.ok_or(CatalogImportError::MissingName { row })?;

        let amount_max = match self.max_amount {
            Some(value) => Some(
                parse_amount(&value).ok_or(CatalogImportError::InvalidAmount { row, value })?,
            ),
            None => None,
        };

        let deadline = match self.deadline {
            Some(value) => Some(
                parse_deadline(&value).ok_or(CatalogImportError::InvalidDeadline { row, value })?,
            ),
            None => None,
        };

        Ok(Grant {
            id: RecordId::default(),
            name,
            description: self.description.unwrap_or_default(),
            sectors: split_list(self.sectors.as_deref()),
            location_scope: split_list(self.regions.as_deref()),
            grant_type: self.grant_type.unwrap_or_default(),
            amount_max,
            deadline,
            eligibility_text: self.eligibility.unwrap_or_default(),
            whats_covered: split_list(self.covers.as_deref()),
            is_active: self.active.as_deref().map_or(true, parse_flag),
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|value| {
            value
                .split(';')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_amount(value: &str) -> Option<f64> {
    let digits: String = value
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '£' | ',' | ' '))
        .collect();
    digits
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
}

fn parse_deadline(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .ok()
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "no" | "n" | "false" | "0" | "inactive" | "closed"
    )
}

fn unique_id(name: &str, used: &mut HashSet<String>) -> RecordId {
    let slug = normalize_text(name)
        .unwrap_or_default()
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    let base = format!("grant-{slug}");
    let mut candidate = base.clone();
    let mut suffix = 2;
    while !used.insert(candidate.clone()) {
        candidate = format!("{base}-{suffix}");
        suffix += 1;
    }
    RecordId(candidate)
}
