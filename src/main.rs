//! uniAdvise CLI
//!
//! Terminal client for the university recommendation service: an interactive
//! profile form (`advise`) plus non-interactive commands for scripted use.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use uniadvise::{
    config,
    error::{AppError, Result},
    form::{DisplayMode, ProfileForm, Selector},
    models::{MatchTier, OptionTransform, StudentProfile},
    services::{HttpApi, RecommendApi, COUNTRIES_PATH, FIELDS_PATH, RECOMMEND_PATH},
};

/// uniAdvise - University Recommendation Client
#[derive(Parser, Debug)]
#[command(
    name = "uniAdvise",
    version,
    about = "Find universities matching your academic profile"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "uniadvise.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill in the profile form interactively and browse the matches
    #[cfg(feature = "tui")]
    Advise,

    /// Submit a profile from a TOML file and print the ranked matches
    Recommend {
        /// Path to the profile file
        #[arg(short, long)]
        profile: PathBuf,

        /// Print the raw result as JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Fetch and print the choices offered by the lookup endpoints
    Options {
        /// Which endpoint to list; both when omitted
        endpoint: Option<Endpoint>,
    },

    /// Probe the recommendation service health endpoint
    Health,

    /// Validate the configuration file
    Validate,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Endpoint {
    Fields,
    Countries,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load(&cli.config);

    match cli.command {
        #[cfg(feature = "tui")]
        Command::Advise => {
            let api: std::sync::Arc<dyn RecommendApi> =
                std::sync::Arc::new(HttpApi::new(&config.api)?);
            tokio::task::block_in_place(|| uniadvise::tui::run(api))?;
        }

        Command::Recommend { profile, json } => {
            let api = HttpApi::new(&config.api)?;
            let profile = StudentProfile::load(&profile)?;
            run_recommend(&api, profile, json).await?;
        }

        Command::Options { endpoint } => {
            let api = HttpApi::new(&config.api)?;
            run_options(&api, endpoint).await?;
        }

        Command::Health => {
            let api = HttpApi::new(&config.api)?;
            let status = api.health().await?;
            log::info!(
                "Service is {} (reported at {})",
                status.status,
                status.timestamp
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            let config = config::load_validated(&cli.config)?;
            log::info!("✓ Config OK (API base URL: {})", config.api.base_url);
        }
    }

    Ok(())
}

/// Submit a profile through the same form machine the interactive view uses.
async fn run_recommend(api: &dyn RecommendApi, profile: StudentProfile, json: bool) -> Result<()> {
    let mut form = ProfileForm::new();
    form.set_profile(profile);

    log::info!("Submitting profile to the recommendation service...");
    form.submit(api).await;

    if form.mode() != DisplayMode::Results {
        if let Some(notice) = form.take_notice() {
            log::error!("{notice}");
        }
        return Err(AppError::api(RECOMMEND_PATH, form.summary()));
    }

    if json {
        let report = serde_json::json!({
            "matches": form.results(),
            "summary": form.summary(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&form);
    Ok(())
}

fn print_report(form: &ProfileForm) {
    if form.results().is_empty() {
        println!("No universities matched your profile.");
    }

    for (index, entry) in form.results().iter().enumerate() {
        let medal = match MatchTier::for_position(index) {
            MatchTier::Gold => "🥇",
            MatchTier::Silver => "🥈",
            MatchTier::Bronze => "🥉",
            MatchTier::Unranked => "  ",
        };
        println!("{medal} {}. {}", index + 1, entry.headline());
        println!("     {} · ranked #{}", entry.country, entry.ranking);
        println!(
            "     Tuition {} · admission rate {} · deadline {}",
            entry.tuition_fee, entry.admission_rate, entry.application_deadline
        );
        if entry.scholarship_available {
            println!("     Scholarships available");
        }
        println!();
    }

    println!("AI Analysis & Recommendations");
    println!("─────────────────────────────");
    println!("{}", form.summary());

    if form.processing_time() > 0.0 {
        log::debug!("Generated in {:.2}s", form.processing_time());
    }
}

/// List lookup-endpoint choices; both endpoints are fetched concurrently
/// when none is named, each degrading independently.
async fn run_options(api: &dyn RecommendApi, endpoint: Option<Endpoint>) -> Result<()> {
    let mut fields =
        Selector::with_endpoint("Field of Interest", FIELDS_PATH, OptionTransform::Fields);
    let mut countries = Selector::with_endpoint(
        "Preferred Country",
        COUNTRIES_PATH,
        OptionTransform::Countries,
    );

    match endpoint {
        Some(Endpoint::Fields) => fields.ensure_options(api).await,
        Some(Endpoint::Countries) => countries.ensure_options(api).await,
        None => {
            futures::future::join(fields.ensure_options(api), countries.ensure_options(api)).await;
        }
    }

    let selected: Vec<&Selector> = match endpoint {
        Some(Endpoint::Fields) => vec![&fields],
        Some(Endpoint::Countries) => vec![&countries],
        None => vec![&fields, &countries],
    };

    let mut failed = false;
    for selector in selected {
        println!("{}:", selector.label());
        if let Some(error) = selector.error() {
            failed = true;
            println!("  {error}");
            continue;
        }
        if selector.options().is_empty() {
            println!("  No options available");
        }
        for option in selector.options() {
            if option.value == option.label {
                println!("  {}", option.value);
            } else {
                println!("  {:<16} {}", option.value, option.label);
            }
        }
    }

    if failed {
        return Err(AppError::api("options", "one or more lookups failed"));
    }
    Ok(())
}
