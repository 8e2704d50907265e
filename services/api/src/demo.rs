use crate::infra::{build_service, read_json_file, seeded_service, SharedService};
use carbon_path::config::AppConfig;
use carbon_path::error::AppError;
use carbon_path::matching::{
    AssessmentAnswers, BusinessProfile, ConsultantMatches, EmployeeBand, Matched, MatchWeights,
    MatchedConsultant, MatchedGrant, MatchedSubsidy, ProfileInput, UserId,
};
use carbon_path::store::import_grants_csv;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

/// Inputs shared by every `match` subcommand.
#[derive(Args, Debug, Default)]
pub(crate) struct MatchInputArgs {
    /// JSON file holding a saved business profile
    #[arg(long)]
    pub(crate) profile: Option<PathBuf>,
    /// JSON file holding self-assessment answers
    #[arg(long)]
    pub(crate) assessment: Option<PathBuf>,
    /// Only print the highest ranked results
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Print the ranked records as JSON
    #[arg(long)]
    pub(crate) json: bool,
    /// Rank against the built-in seed catalogue instead of the configured data source
    #[arg(long)]
    pub(crate) seed: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct GrantMatchArgs {
    #[command(flatten)]
    pub(crate) input: MatchInputArgs,
    /// Location overriding the one in the profile or answers
    #[arg(long)]
    pub(crate) location: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SubsidyMatchArgs {
    #[command(flatten)]
    pub(crate) input: MatchInputArgs,
    /// Employee band overriding the profile headcount (e.g. 12, 10-49, medium)
    #[arg(long, value_parser = parse_employee_band)]
    pub(crate) employee_band: Option<EmployeeBand>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ConsultantMatchArgs {
    #[command(flatten)]
    pub(crate) input: MatchInputArgs,
    /// Consultant specialty to look for; repeat for several
    #[arg(long)]
    pub(crate) specialty: Vec<String>,
    /// Location overriding the one in the profile or answers
    #[arg(long)]
    pub(crate) location: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogImportArgs {
    /// Grant catalogue export (Name,Description,Sectors,Regions,Type,Max Amount,...)
    #[arg(long)]
    pub(crate) grants_csv: PathBuf,
    /// Local snapshot to update; created from the seed catalogue when missing
    #[arg(long)]
    pub(crate) out: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Sector of the demo business
    #[arg(long, default_value = "Manufacturing")]
    pub(crate) sector: String,
    /// Headcount of the demo business
    #[arg(long, default_value_t = 35)]
    pub(crate) employees: u32,
    /// Town, city, or region of the demo business
    #[arg(long, default_value = "Derby")]
    pub(crate) location: String,
    /// Results listed per section
    #[arg(long, default_value_t = 3)]
    pub(crate) top: usize,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            sector: "Manufacturing".to_string(),
            employees: 35,
            location: "Derby".to_string(),
            top: 3,
        }
    }
}

pub(crate) fn parse_employee_band(raw: &str) -> Result<EmployeeBand, String> {
    EmployeeBand::parse(raw).ok_or_else(|| {
        format!("unrecognised employee band '{raw}' (try a headcount, 1-9, 10-49, 50-249, or 250+)")
    })
}

pub(crate) async fn run_grant_match(args: GrantMatchArgs) -> Result<(), AppError> {
    let service = service_for(&args.input).await?;
    let input = load_profile_input(&args.input)?;
    let matches = service
        .grants_for(&input, args.location.as_deref(), args.input.top)
        .await?;

    if args.input.json {
        return print_json(&matches);
    }
    render_grants(&matches);
    Ok(())
}

pub(crate) async fn run_subsidy_match(args: SubsidyMatchArgs) -> Result<(), AppError> {
    let service = service_for(&args.input).await?;
    let input = load_profile_input(&args.input)?;
    let matches = service
        .subsidies_for(&input, args.employee_band, args.input.top)
        .await?;

    if args.input.json {
        return print_json(&matches);
    }
    render_subsidies(&matches);
    Ok(())
}

pub(crate) async fn run_consultant_match(args: ConsultantMatchArgs) -> Result<(), AppError> {
    let service = service_for(&args.input).await?;
    let input = load_profile_input(&args.input)?;

    let location = args.location.clone().or_else(|| match &input {
        ProfileInput::Profile(profile) => profile.location.clone(),
        _ => None,
    });
    let specialties = if args.specialty.is_empty() {
        None
    } else {
        Some(args.specialty.as_slice())
    };

    let matches = service
        .consultants_for(
            input.assessment(),
            specialties,
            location.as_deref(),
            args.input.top,
        )
        .await?;

    if args.input.json {
        return print_json(&matches);
    }
    render_consultants(&matches);
    Ok(())
}

pub(crate) fn run_catalog_import(args: CatalogImportArgs) -> Result<(), AppError> {
    let snapshot = import_grants_csv(&args.grants_csv, &args.out)?;
    let active = snapshot.grants.iter().filter(|grant| grant.is_active).count();

    println!(
        "Imported {} grants ({} active) into {}",
        snapshot.grants.len(),
        active,
        args.out.display()
    );
    println!(
        "Kept {} subsidies, {} consultants, and {} saved profiles",
        snapshot.subsidies.len(),
        snapshot.consultants.len(),
        snapshot.profiles.len()
    );
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = seeded_service(MatchWeights::default());
    let user = UserId("demo-business".to_string());
    let profile = demo_profile(&args);

    println!("Carbon Path matching demo");
    println!(
        "Business: {} | {} | {} staff | {}",
        profile.company_name.as_deref().unwrap_or("Demo business"),
        args.sector,
        args.employees,
        args.location
    );

    service.save_profile(&user, &profile).await?;
    let dashboard = service.dashboard_for(&user, args.top).await?;

    render_grants(&dashboard.grants);
    render_subsidies(&dashboard.subsidies);
    render_consultants(&ConsultantMatches {
        recommended_types: dashboard.recommended_consultant_types,
        consultants: dashboard.consultants,
    });

    let anonymous = service
        .grants_for(&ProfileInput::Anonymous, None, Some(args.top))
        .await?;
    println!(
        "\nWithout a profile every grant scores the {} baseline ({} shown)",
        service.weights().baseline,
        anonymous.len()
    );
    Ok(())
}

fn demo_profile(args: &DemoArgs) -> BusinessProfile {
    let mut feature_interests = BTreeMap::new();
    feature_interests.insert("energy_efficiency".to_string(), 5);
    feature_interests.insert("solar".to_string(), 4);
    feature_interests.insert("recycling".to_string(), 2);

    BusinessProfile {
        company_name: Some(format!("{} demo business", args.sector)),
        sector: Some(args.sector.clone()),
        employee_count: Some(args.employees.to_string()),
        location: Some(args.location.clone()),
        postcode: None,
        assessment: Some(AssessmentAnswers {
            sector: Some(args.sector.clone()),
            employee_count: Some(args.employees.to_string()),
            location: Some(args.location.clone()),
            barriers: vec!["upfront cost".to_string(), "lack of time".to_string()],
            feature_interests,
        }),
    }
}

async fn service_for(args: &MatchInputArgs) -> Result<SharedService, AppError> {
    let config = AppConfig::load()?;
    if args.seed {
        return Ok(seeded_service(config.weights));
    }
    build_service(&config).await
}

fn load_profile_input(args: &MatchInputArgs) -> Result<ProfileInput, AppError> {
    let profile = args
        .profile
        .as_deref()
        .map(read_json_file::<BusinessProfile>)
        .transpose()?;
    let assessment = args
        .assessment
        .as_deref()
        .map(read_json_file::<AssessmentAnswers>)
        .transpose()?;
    Ok(ProfileInput::from_parts(profile, assessment))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    println!("{rendered}");
    Ok(())
}

fn render_grants(matches: &[MatchedGrant]) {
    println!("\nGrant matches");
    if matches.is_empty() {
        println!("- none available");
        return;
    }
    for entry in matches {
        let amount = entry
            .record
            .amount_max
            .map(|amount| format!(" | up to £{amount:.0}"))
            .unwrap_or_default();
        let deadline = entry
            .record
            .deadline
            .map(|date| format!(" | closes {date}"))
            .unwrap_or_default();
        println!(
            "- {:>3} {}{}{}{}",
            entry.match_score,
            entry.record.name,
            amount,
            deadline,
            badge(entry)
        );
        render_reasons(entry);
    }
}

fn render_subsidies(matches: &[MatchedSubsidy]) {
    println!("\nSubsidy matches");
    if matches.is_empty() {
        println!("- none available");
        return;
    }
    for entry in matches {
        println!(
            "- {:>3} {} ({}){}",
            entry.match_score,
            entry.record.name,
            entry.record.subsidy_type.label(),
            badge(entry)
        );
        render_reasons(entry);
    }
}

fn render_consultants(matches: &ConsultantMatches) {
    println!(
        "\nRecommended consultant types: {}",
        matches.recommended_types.join(", ")
    );
    if matches.consultants.is_empty() {
        println!("- no approved consultants listed");
        return;
    }
    for entry in &matches.consultants {
        render_consultant(entry);
    }
}

fn render_consultant(entry: &MatchedConsultant) {
    let region = if entry.record.region.is_empty() {
        "region not listed"
    } else {
        entry.record.region.as_str()
    };
    println!(
        "- {:>3} {} | {} | {}{}",
        entry.match_score,
        entry.record.name,
        entry.record.specialty,
        region,
        badge(entry)
    );
    render_reasons(entry);
}

fn render_reasons<T>(entry: &Matched<T>) {
    for reason in &entry.match_reasons {
        println!("      {reason}");
    }
}

fn badge<T>(entry: &Matched<T>) -> &'static str {
    if entry.good_match {
        " [good match]"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_band_parser_accepts_counts_and_labels() {
        assert_eq!(parse_employee_band("12"), Ok(EmployeeBand::Small));
        assert_eq!(parse_employee_band("250+"), Ok(EmployeeBand::Large));
        let error = parse_employee_band("loads").expect_err("not a band");
        assert!(error.contains("loads"));
    }

    #[test]
    fn demo_profile_carries_assessment_signals() {
        let profile = demo_profile(&DemoArgs::default());
        let answers = profile.assessment.expect("assessment attached");
        assert_eq!(answers.location.as_deref(), Some("Derby"));
        assert_eq!(answers.feature_interests.get("energy_efficiency"), Some(&5));
        assert_eq!(profile.employee_count.as_deref(), Some("35"));
    }

    #[test]
    fn profile_input_combines_profile_and_assessment_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let profile_path = dir.path().join("profile.json");
        let answers_path = dir.path().join("answers.json");
        std::fs::write(&profile_path, r#"{"sector":"Retail","location":"Leeds"}"#)
            .expect("write profile");
        std::fs::write(&answers_path, r#"{"barriers":["upfront cost"]}"#).expect("write answers");

        let input = load_profile_input(&MatchInputArgs {
            profile: Some(profile_path),
            assessment: Some(answers_path),
            ..MatchInputArgs::default()
        })
        .expect("input loads");

        match input {
            ProfileInput::Profile(profile) => {
                assert_eq!(profile.sector.as_deref(), Some("Retail"));
                let answers = profile.assessment.expect("answers attached");
                assert_eq!(answers.barriers, vec!["upfront cost".to_string()]);
            }
            other => panic!("expected profile input, got {other:?}"),
        }
    }

    #[test]
    fn no_files_means_anonymous() {
        let input = load_profile_input(&MatchInputArgs::default()).expect("input");
        assert_eq!(input, ProfileInput::Anonymous);
    }

    #[tokio::test]
    async fn demo_profile_ranks_against_the_seed() {
        let service = seeded_service(MatchWeights::default());
        let user = UserId("demo-test".to_string());
        let args = DemoArgs::default();
        service
            .save_profile(&user, &demo_profile(&args))
            .await
            .expect("saved");

        let dashboard = service.dashboard_for(&user, args.top).await.expect("dashboard");
        assert!(dashboard.profile_found);
        assert!(!dashboard.grants.is_empty());
        assert!(dashboard.grants[0].match_score > service.weights().baseline);
    }
}
