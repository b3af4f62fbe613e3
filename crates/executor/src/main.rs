pub mod cache;
pub mod config;
pub mod csv_source;
pub mod error;
pub mod fetcher;
pub mod renderer;
pub mod sim_source;
pub mod types;

use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, error, info};

use cache::CachedSource;
use common::types::{LocationId, RawLocationRecord};
use csv_source::CsvSource;
use error::Error;
use fetcher::Fetcher;
use patrol_core::{DedupMode, GraphBuilder, PathStackFinder, PatrolPlan, PatrolPlanner, RouteSelector};
use sim_source::SimulatedSource;
use types::{LocationSource, RegionId, SourceKind};

/// Finds the most active patrol loop through low-security space.
#[derive(Parser, Debug)]
#[command(name = "patrol", version)]
struct Cli {
    /// Configuration file (defaults to crates/executor/Config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Region to analyze; repeat for several regions
    #[arg(long = "region")]
    regions: Vec<RegionId>,

    /// Locations with a security rating at or above this value are ignored
    #[arg(long)]
    threshold: Option<f64>,

    /// Location every patrol loop starts from
    #[arg(long)]
    origin: Option<LocationId>,

    #[arg(long, value_enum)]
    source: Option<SourceKind>,

    /// Systems CSV export (csv source)
    #[arg(long)]
    systems: Option<PathBuf>,

    /// Activity CSV export (csv source)
    #[arg(long)]
    activity: Option<PathBuf>,

    /// Where to write the Graphviz rendering
    #[arg(long)]
    output: Option<PathBuf>,

    /// Treat rotations and reversals of a loop as the same route
    #[arg(long)]
    canonical_dedup: bool,
}

impl Cli {
    /// Command-line values take precedence over the configuration file.
    fn apply(self, config: &mut config::Config) {
        if !self.regions.is_empty() {
            config.analysis.region_ids = self.regions;
        }
        if let Some(threshold) = self.threshold {
            config.analysis.security_threshold = threshold;
        }
        if let Some(origin) = self.origin {
            config.analysis.origin = origin;
        }
        if self.canonical_dedup {
            config.analysis.canonical_dedup = true;
        }
        if let Some(kind) = self.source {
            config.source.kind = kind;
        }
        if self.systems.is_some() {
            config.source.systems_path = self.systems;
        }
        if self.activity.is_some() {
            config.source.activity_path = self.activity;
        }
        if let Some(output) = self.output {
            config.output.dot_path = output;
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Error> {
    let config_path = cli.config.clone();
    let mut config = config::load_config(config_path.as_deref())?;
    cli.apply(&mut config);

    let records = fetch_records(&config).await?;

    let dedup = if config.analysis.canonical_dedup {
        DedupMode::Canonical
    } else {
        DedupMode::Exact
    };
    let planner = PatrolPlanner::new(
        GraphBuilder::new(config.analysis.security_threshold),
        PathStackFinder,
        RouteSelector::new(dedup),
        config.analysis.origin,
    );

    let plan = planner.plan(&records)?;
    report(&plan);

    renderer::write_dot(&plan, &config.output.dot_path)?;
    Ok(())
}

/// Builds the configured source behind a response cache and fetches every
/// requested region.
async fn fetch_records(
    config: &config::Config,
) -> Result<HashMap<LocationId, RawLocationRecord>, Error> {
    let regions = &config.analysis.region_ids;

    match config.source.kind {
        SourceKind::Csv => {
            info!("Starting CSV location source...");
            let systems = config.source.systems_path.as_deref().ok_or_else(|| {
                Error::ConfigLoadError("source.systems_path is required for the csv source".into())
            })?;
            let source = CsvSource::open(systems, config.source.activity_path.as_deref())?;
            fetch_cached(source, regions).await
        }
        SourceKind::Sim => {
            info!("Starting simulated location source...");
            let source = SimulatedSource::generate(&config.simulator, regions);
            info!(systems = source.num_locations(), "generated simulated catalog");
            fetch_cached(source, regions).await
        }
    }
}

async fn fetch_cached<S: LocationSource>(
    source: S,
    regions: &[RegionId],
) -> Result<HashMap<LocationId, RawLocationRecord>, Error> {
    let fetcher = Fetcher::new(CachedSource::new(source));
    let records = fetcher.fetch_regions(regions).await?;
    debug!(
        hits = fetcher.source().hits(),
        misses = fetcher.source().misses(),
        "location cache"
    );
    Ok(records)
}

fn report(plan: &PatrolPlan) {
    println!("Found {} unique paths", plan.routes.len());

    if plan.has_route() {
        println!(
            "Most active route was: {:?}\n\t with {} kills and {} jumps",
            plan.route_names(),
            plan.best.total_kills,
            plan.best.total_jumps
        );
    } else {
        println!("No recommended route from origin {}.", plan.origin);
    }
}
