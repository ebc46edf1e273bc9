//! Tripwise - build and book a travel package from the terminal
//!
//! Usage:
//!   tripwise init              Create a template tripwise.toml
//!   tripwise catalog           List what the booking service offers
//!   tripwise quote <file>      Price a saved selection
//!   tripwise build             Run the interactive package builder

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tripwise::api::{CatalogService, HttpBackend};
use tripwise::catalog::{Catalog, CatalogId, TransportKind};
use tripwise::config::{self, PricingStrategy, TripwiseConfig, CONFIG_FILE_NAME};
use tripwise::pricing::{CatalogRates, RateSource};
use tripwise::selection::PackageSelection;
use tripwise::ui::{self, format_money, Outcome, TerminalView};
use tripwise::wizard::PackageBuilderWizard;

#[derive(Parser)]
#[command(name = "tripwise")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tripwise - build, price and book custom travel packages")]
struct Cli {
    /// Path to tripwise.toml (default: ./tripwise.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a template tripwise.toml in the current directory
    Init {
        /// Base URL of the booking API
        #[arg(long, default_value = "http://localhost:3000/api")]
        base_url: String,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// List destinations, stays, transport and activities
    Catalog {
        /// Only show offers for this destination
        #[arg(short, long)]
        destination: Option<String>,
    },

    /// Price a selection saved as JSON
    Quote {
        /// Path to the selection file
        file: PathBuf,

        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build and book a package interactively
    Build,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let _ = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .try_init();

    match cli.command {
        Commands::Init { base_url, force } => run_init(&base_url, force),
        Commands::Catalog { destination } => {
            let config = load_config(cli.config.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_catalog(&config, destination.map(CatalogId::from)))
        }
        Commands::Quote { file, json } => {
            let config = load_config(cli.config.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_quote(&config, &file, json))
        }
        Commands::Build => {
            let config = load_config(cli.config.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_build(&config))
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<TripwiseConfig> {
    let config = TripwiseConfig::load(path)?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn run_init(base_url: &str, force: bool) -> Result<()> {
    let path = std::env::current_dir()?.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    let template = config::generate_template(base_url);
    TripwiseConfig::from_str(&template)?.validate()?;
    std::fs::write(&path, template)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("✅ Created {}", path.display());
    Ok(())
}

async fn run_catalog(config: &TripwiseConfig, destination: Option<CatalogId>) -> Result<()> {
    let backend = HttpBackend::new(&config.api)?;
    let catalog = backend
        .load_catalog(destination.as_ref())
        .await
        .context("Failed to load the catalog")?;
    let currency = &config.pricing.currency;

    println!("Destinations:");
    for d in &catalog.destinations {
        println!("  [{}] {}", d.id, d.name);
    }

    println!("\nAccommodations:");
    for a in &catalog.accommodations {
        println!("  [{}] {} - {} / night", a.id, a.name, format_money(a.price_per_night, currency));
    }

    for kind in [TransportKind::Flight, TransportKind::CarRental, TransportKind::LocalTransport] {
        println!("\n{}:", kind.label());
        for t in catalog.transport_of_kind(kind) {
            match t.price_per_day.or(t.price) {
                Some(price) => println!("  [{}] {} - {}", t.id, t.name, format_money(price, currency)),
                None => println!("  [{}] {}", t.id, t.name),
            }
        }
    }

    println!("\nActivities ({} per traveler):", format_money(config.pricing.activity_rate, currency));
    for a in &catalog.activities {
        println!("  [{}] {}", a.id, a.name);
    }

    Ok(())
}

async fn run_quote(config: &TripwiseConfig, file: &Path, json: bool) -> Result<()> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read selection file: {}", file.display()))?;
    let selection: PackageSelection = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse selection file: {}", file.display()))?;

    match config.pricing.strategy {
        PricingStrategy::Fixed => {
            print_quote(config.pricing.fixed_rates(), &Catalog::default(), config, selection, json)
        }
        PricingStrategy::Catalog => {
            let backend = HttpBackend::new(&config.api)?;
            let catalog = backend
                .load_catalog(selection.destination_id.as_ref())
                .await
                .context("Failed to load the catalog")?;
            let rates = CatalogRates::from_catalog(&catalog, config.pricing.activity_rate);
            print_quote(rates, &catalog, config, selection, json)
        }
    }
}

fn print_quote<R: RateSource>(
    rates: R,
    catalog: &Catalog,
    config: &TripwiseConfig,
    selection: PackageSelection,
    json: bool,
) -> Result<()> {
    let mut wizard = PackageBuilderWizard::new(rates, config.pricing.currency.clone());
    wizard.load_selection(selection)?;

    if json {
        println!("{}", serde_json::to_string_pretty(wizard.pricing())?);
    } else {
        print!("{}", ui::render_summary(&wizard.snapshot(), catalog));
    }
    Ok(())
}

async fn run_build(config: &TripwiseConfig) -> Result<()> {
    info!("Tripwise v{}", env!("CARGO_PKG_VERSION"));
    info!("Booking service: {}", config.api.base_url);

    let backend = HttpBackend::new(&config.api)?;
    let catalog = backend
        .load_catalog(None)
        .await
        .context("Failed to load the catalog")?;
    info!(
        "Catalog: {} destinations, {} stays, {} transport options, {} activities",
        catalog.destinations.len(),
        catalog.accommodations.len(),
        catalog.transport_options.len(),
        catalog.activities.len()
    );

    let outcome = match config.pricing.strategy {
        PricingStrategy::Fixed => {
            build_with(config.pricing.fixed_rates(), &catalog, config, &backend).await?
        }
        PricingStrategy::Catalog => {
            let rates = CatalogRates::from_catalog(&catalog, config.pricing.activity_rate);
            build_with(rates, &catalog, config, &backend).await?
        }
    };

    match outcome {
        Outcome::Booked(confirmation) => {
            println!();
            println!("✅ Package booked. Reference: {}", confirmation.reference());
        }
        Outcome::Abandoned => {
            println!("Package discarded.");
        }
    }
    Ok(())
}

async fn build_with<R: RateSource>(
    rates: R,
    catalog: &Catalog,
    config: &TripwiseConfig,
    backend: &HttpBackend,
) -> Result<Outcome> {
    let mut wizard = PackageBuilderWizard::new(rates, config.pricing.currency.clone())
        .with_view(Box::new(TerminalView::new(catalog.clone())));

    ui::run_wizard(&mut wizard, catalog, backend).await
}
