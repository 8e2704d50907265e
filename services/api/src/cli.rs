use crate::demo::{
    run_catalog_import, run_consultant_match, run_demo, run_grant_match, run_subsidy_match,
    CatalogImportArgs, ConsultantMatchArgs, DemoArgs, GrantMatchArgs, SubsidyMatchArgs,
};
use crate::server;
use carbon_path::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Carbon Path",
    about = "Match UK SMEs with sustainability grants, subsidies, and consultants",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank catalogue records for a business profile from the command line
    Match {
        #[command(subcommand)]
        command: MatchCommand,
    },
    /// Maintain the local catalogue snapshot
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Walk through grant, subsidy, and consultant matches against the seed catalogue
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum MatchCommand {
    /// Rank active grants
    Grants(GrantMatchArgs),
    /// Rank active subsidies
    Subsidies(SubsidyMatchArgs),
    /// Recommend consultant types and rank approved consultants
    Consultants(ConsultantMatchArgs),
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Replace the grant catalogue of a local snapshot with a CSV export
    Import(CatalogImportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Serve from this local JSON snapshot regardless of the configured data source
    #[arg(long)]
    pub(crate) local_store: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Match {
            command: MatchCommand::Grants(args),
        } => run_grant_match(args).await,
        Command::Match {
            command: MatchCommand::Subsidies(args),
        } => run_subsidy_match(args).await,
        Command::Match {
            command: MatchCommand::Consultants(args),
        } => run_consultant_match(args).await,
        Command::Catalog {
            command: CatalogCommand::Import(args),
        } => run_catalog_import(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
