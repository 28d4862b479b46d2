//! CLI for the world-atlas catalog.
//!
//! Drives the continent/country/landmark services against the configured
//! JSON data file.
//!
//! # Usage
//!
//! ```bash
//! # List continents, filtered and sorted
//! cargo run -- continent list --filter population:GREATER:1000000 --sort name
//!
//! # Show one country (codes are case-insensitive on input)
//! cargo run -- country get pl
//!
//! # Add a landmark
//! cargo run -- landmark add PL --name Wawel --type Zamek \
//!     --description "Zamek królewski w Krakowie"
//!
//! # Remove a continent (asks for confirmation unless --yes)
//! cargo run -- continent remove EU
//! ```
//!
//! # Environment Variables
//!
//! - `ATLAS_DATA_FILE`: path to the backing JSON document (default: `dane.json`)
//! - `RUST_LOG` / `LOG_FORMAT`: logging configuration

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use world_atlas::application::services::{
    ContinentService, CountryService, DeleteOutcome, LandmarkService,
};
use world_atlas::config::{self, Config};
use world_atlas::domain::entities::{
    ContinentInput, ContinentPatch, ContinentUpdate, CountryInput, CountryPatch, CountryUpdate,
    LandmarkInput, LandmarkPatch, LandmarkUpdate,
};
use world_atlas::domain::store::DocumentStore;
use world_atlas::error::AppError;
use world_atlas::infrastructure::persistence::JsonFileRepository;
use world_atlas::query::{FilterClause, SortOrder, SortSpec};

/// CLI tool for managing the catalog.
#[derive(Parser)]
#[command(name = "atlas")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the backing JSON document (overrides ATLAS_DATA_FILE).
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage continents
    Continent {
        #[command(subcommand)]
        action: ContinentAction,
    },

    /// Manage countries
    Country {
        #[command(subcommand)]
        action: CountryAction,
    },

    /// Manage landmarks
    Landmark {
        #[command(subcommand)]
        action: LandmarkAction,
    },
}

/// Continent subcommands.
#[derive(Subcommand)]
enum ContinentAction {
    /// List continents
    List {
        /// Filter clause as field:OPERATION:value (repeatable)
        #[arg(long = "filter")]
        filters: Vec<String>,

        /// Sort by this field
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
    },

    /// Show one continent by code
    Get { code: String },

    /// Add a continent
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
        #[arg(long)]
        population: Option<String>,
        #[arg(long)]
        area: Option<String>,
    },

    /// Replace a continent's name, population, and area
    Set {
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        population: String,
        #[arg(long)]
        area: String,
    },

    /// Update only the supplied fields
    Patch {
        code: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        population: Option<String>,
        #[arg(long)]
        area: Option<String>,
    },

    /// Remove a continent and all of its descendants
    Remove {
        code: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Country subcommands.
#[derive(Subcommand)]
enum CountryAction {
    /// List countries across all continents
    List {
        /// Filter clause as field:OPERATION:value (repeatable)
        #[arg(long = "filter")]
        filters: Vec<String>,

        /// Sort by this field
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
    },

    /// Show one country by code
    Get { code: String },

    /// Add a country under a continent
    Add {
        /// Code of the owning continent
        continent: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        capital: String,
        #[arg(long)]
        code: String,
    },

    /// Replace a country's name and capital
    Set {
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        capital: String,
    },

    /// Update only the supplied fields
    Patch {
        code: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        capital: Option<String>,
    },

    /// Remove a country and all of its landmarks
    Remove {
        code: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Landmark subcommands.
#[derive(Subcommand)]
enum LandmarkAction {
    /// List landmarks, optionally scoped to one country
    List {
        /// Restrict to this country code
        #[arg(long)]
        country: Option<String>,

        /// Filter clause as field:OPERATION:value (repeatable)
        #[arg(long = "filter")]
        filters: Vec<String>,

        /// Sort by this field
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
    },

    /// Show one landmark by country code and name
    Get { country: String, name: String },

    /// Add a landmark to a country
    Add {
        /// Code of the owning country
        country: String,
        #[arg(long)]
        name: String,
        #[arg(long = "type")]
        kind: String,
        #[arg(long)]
        description: String,
    },

    /// Replace a landmark's type and description
    Set {
        country: String,
        name: String,
        #[arg(long = "type")]
        kind: String,
        #[arg(long)]
        description: String,
    },

    /// Update only the supplied fields
    Patch {
        country: String,
        name: String,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },

    /// Remove a landmark from a country
    Remove {
        country: String,
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = config::load_from_env()?;
    if let Some(path) = cli.data_file.clone() {
        config.data_file = path;
    }

    init_tracing(&config);

    let repository = Arc::new(JsonFileRepository::new(
        config.data_file.clone(),
        config.pretty_persist,
    ));
    let store = Arc::new(DocumentStore::new(repository));

    if let Err(err) = dispatch(cli.command, &store).await {
        report_error(&err);
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn dispatch(
    command: Commands,
    store: &Arc<DocumentStore<JsonFileRepository>>,
) -> Result<(), AppError> {
    match command {
        Commands::Continent { action } => {
            run_continent(action, ContinentService::new(Arc::clone(store))).await
        }
        Commands::Country { action } => {
            run_country(action, CountryService::new(Arc::clone(store))).await
        }
        Commands::Landmark { action } => {
            run_landmark(action, LandmarkService::new(Arc::clone(store))).await
        }
    }
}

async fn run_continent(
    action: ContinentAction,
    service: ContinentService<JsonFileRepository>,
) -> Result<(), AppError> {
    match action {
        ContinentAction::List { filters, sort, desc } => {
            let clauses = parse_filters(&filters)?;
            let spec = sort_spec(sort, desc);
            let continents = service
                .list_continents(Some(&clauses), spec.as_ref())
                .await?;
            print_json(&continents)
        }
        ContinentAction::Get { code } => {
            let continent = service.get_continent(&code).await?;
            print_json(&continent)
        }
        ContinentAction::Add {
            name,
            code,
            population,
            area,
        } => {
            let created = service
                .create_continent(ContinentInput {
                    name: Some(name),
                    code: Some(code),
                    population,
                    area,
                    countries: None,
                })
                .await?;
            println!("{} continent {} added", "✓".green(), created.code.bold());
            print_json(&created)
        }
        ContinentAction::Set {
            code,
            name,
            population,
            area,
        } => {
            let updated = service
                .update_continent(
                    &code,
                    ContinentUpdate {
                        name: Some(name),
                        population: Some(population),
                        area: Some(area),
                    },
                )
                .await?;
            print_json(&updated)
        }
        ContinentAction::Patch {
            code,
            name,
            population,
            area,
        } => {
            let patched = service
                .patch_continent(
                    &code,
                    ContinentPatch {
                        name,
                        population,
                        area,
                    },
                )
                .await?;
            print_json(&patched)
        }
        ContinentAction::Remove { code, yes } => {
            if !confirm_removal(&format!("Remove continent {code} and all of its descendants?"), yes) {
                return Ok(());
            }
            report_outcome(service.delete_continent(&code).await?)
        }
    }
}

async fn run_country(
    action: CountryAction,
    service: CountryService<JsonFileRepository>,
) -> Result<(), AppError> {
    match action {
        CountryAction::List { filters, sort, desc } => {
            let clauses = parse_filters(&filters)?;
            let spec = sort_spec(sort, desc);
            let countries = service.list_countries(Some(&clauses), spec.as_ref()).await?;
            print_json(&countries)
        }
        CountryAction::Get { code } => {
            let located = service.get_country(&code).await?;
            print_json(&located)
        }
        CountryAction::Add {
            continent,
            name,
            capital,
            code,
        } => {
            let created = service
                .create_country(
                    &continent,
                    CountryInput {
                        name: Some(name),
                        capital: Some(capital),
                        code: Some(code),
                        landmarks: None,
                        details: None,
                    },
                )
                .await?;
            println!("{} country {} added", "✓".green(), created.code.bold());
            print_json(&created)
        }
        CountryAction::Set { code, name, capital } => {
            let updated = service
                .update_country(
                    &code,
                    CountryUpdate {
                        name: Some(name),
                        capital: Some(capital),
                        landmarks: None,
                        details: None,
                    },
                )
                .await?;
            print_json(&updated)
        }
        CountryAction::Patch { code, name, capital } => {
            let patched = service
                .patch_country(
                    &code,
                    CountryPatch {
                        name,
                        capital,
                        details: None,
                    },
                )
                .await?;
            print_json(&patched)
        }
        CountryAction::Remove { code, yes } => {
            if !confirm_removal(&format!("Remove country {code} and all of its landmarks?"), yes) {
                return Ok(());
            }
            report_outcome(service.delete_country(&code).await?)
        }
    }
}

async fn run_landmark(
    action: LandmarkAction,
    service: LandmarkService<JsonFileRepository>,
) -> Result<(), AppError> {
    match action {
        LandmarkAction::List {
            country,
            filters,
            sort,
            desc,
        } => {
            let clauses = parse_filters(&filters)?;
            let spec = sort_spec(sort, desc);
            let landmarks = service
                .list_landmarks(country.as_deref(), Some(&clauses), spec.as_ref())
                .await?;
            print_json(&landmarks)
        }
        LandmarkAction::Get { country, name } => {
            let landmark = service.get_landmark(&country, &name).await?;
            print_json(&landmark)
        }
        LandmarkAction::Add {
            country,
            name,
            kind,
            description,
        } => {
            let added = service
                .add_landmark(
                    &country,
                    LandmarkInput {
                        name: Some(name),
                        kind: Some(kind),
                        description: Some(description),
                        details: None,
                    },
                )
                .await?;
            println!("{} landmark {} added", "✓".green(), added.name.bold());
            print_json(&added)
        }
        LandmarkAction::Set {
            country,
            name,
            kind,
            description,
        } => {
            let updated = service
                .update_landmark(
                    &country,
                    &name,
                    LandmarkUpdate {
                        kind: Some(kind),
                        description: Some(description),
                        details: None,
                    },
                )
                .await?;
            print_json(&updated)
        }
        LandmarkAction::Patch {
            country,
            name,
            kind,
            description,
        } => {
            let patched = service
                .patch_landmark(
                    &country,
                    &name,
                    LandmarkPatch {
                        kind,
                        description,
                        details: None,
                    },
                )
                .await?;
            print_json(&patched)
        }
        LandmarkAction::Remove { country, name, yes } => {
            if !confirm_removal(&format!("Remove landmark {name} from {country}?"), yes) {
                return Ok(());
            }
            report_outcome(service.delete_landmark(&country, &name).await?)
        }
    }
}

/// Parses repeated `field:OPERATION:value` flags into filter clauses.
///
/// Unknown operator names fail closed with a filter error.
fn parse_filters(raw: &[String]) -> Result<Vec<FilterClause>, AppError> {
    raw.iter()
        .map(|entry| {
            let mut parts = entry.splitn(3, ':');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(field), Some(operation), Some(value)) => Ok(FilterClause::new(
                    field,
                    operation.parse()?,
                    value,
                )),
                _ => Err(AppError::filter(
                    "Filter must be field:OPERATION:value",
                    serde_json::json!({ "filter": entry }),
                )),
            }
        })
        .collect()
}

fn sort_spec(sort: Option<String>, desc: bool) -> Option<SortSpec> {
    sort.map(|field| {
        SortSpec::new(
            field,
            if desc { SortOrder::Desc } else { SortOrder::Asc },
        )
    })
}

fn confirm_removal(prompt: &str, yes: bool) -> bool {
    if yes {
        return true;
    }

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .unwrap_or(false);

    if !confirmed {
        println!("{}", "Aborted.".yellow());
    }
    confirmed
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|_| AppError::internal("Failed to render output", serde_json::json!({})))?;
    println!("{rendered}");
    Ok(())
}

fn report_outcome(outcome: DeleteOutcome) -> Result<(), AppError> {
    if outcome.success {
        println!("{} {}", "✓".green(), outcome.message);
    } else {
        println!(
            "{} {} ({})",
            "✗".red(),
            outcome.message,
            outcome.code.dimmed()
        );
    }
    Ok(())
}

fn report_error(err: &AppError) {
    let info = err.to_info();
    eprintln!("{} {}", info.code.red().bold(), info.message);

    if !info.details.is_null() && info.details != serde_json::json!({}) {
        if let Ok(details) = serde_json::to_string_pretty(&info.details) {
            eprintln!("{}", details.dimmed());
        }
    }
}
