use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rail_network::Error;
use rail_network::export::{OutputProfile, save_document};
use rail_network::network::{BuildConfig, build_network};
use rail_network::overpass::{
    BatchSource, FileSource, OverpassClient, OverpassConfig, OverpassQuery, OverpassSource,
    ResponseCache, ResponseCacheConfig,
};

/// Overpass area for Tuscany (OSM relation 41977).
const TUSCANY_AREA_ID: u64 = 3_600_041_977;

/// Build a railway network document from OpenStreetMap data.
#[derive(Debug, Parser)]
#[command(name = "rail-network", version, about)]
struct Args {
    /// Network name, also used for the default output file
    #[arg(long, default_value = "Toscana")]
    name: String,

    /// Overpass area ids to query; the first is mandatory
    #[arg(long = "area-id", default_values_t = [TUSCANY_AREA_ID])]
    area_ids: Vec<u64>,

    /// Read saved Overpass responses instead of querying; the first file is mandatory
    #[arg(long = "input", value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// Output file [default: <NAME>.rail]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output profile: "a" (flat) or "b" (nested)
    #[arg(short, long, default_value_t = OutputProfile::Flat)]
    profile: OutputProfile,

    /// JSON file overriding build parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cache Overpass responses in this directory
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Overpass interpreter endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Query timeout in seconds
    #[arg(long, default_value_t = 300)]
    timeout: u64,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rail_network={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

async fn run(args: Args) -> Result<(), Error> {
    let config = match &args.config {
        Some(path) => BuildConfig::from_json_file(path)?,
        None => BuildConfig::default(),
    };

    let batches = if args.inputs.is_empty() {
        let mut overpass = OverpassConfig::new().with_timeout(args.timeout);
        if let Some(endpoint) = &args.endpoint {
            overpass = overpass.with_endpoint(endpoint.as_str());
        }
        info!(endpoint = %overpass.endpoint, areas = args.area_ids.len(), "Querying Overpass");

        let queries = args
            .area_ids
            .iter()
            .enumerate()
            .map(|(i, &area)| {
                let query = OverpassQuery::train_routes_in_area(area, args.timeout);
                if i == 0 { query.mandatory() } else { query }
            })
            .collect();

        let mut source = OverpassSource::new(OverpassClient::new(overpass)?, queries);
        if let Some(dir) = &args.cache_dir {
            source = source.with_cache(ResponseCache::new(ResponseCacheConfig::new(dir)));
        }
        source.fetch_batches().await
    } else {
        info!(files = args.inputs.len(), "Reading saved responses");
        FileSource::new(args.inputs.clone()).fetch_batches().await
    };

    let build = build_network(&args.name, batches, &config)?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.rail", args.name)));
    save_document(&output, &build.document, args.profile)?;

    info!(
        path = %output.display(),
        profile = %args.profile,
        stations = build.document.stations.len(),
        segments = build.document.segments.len(),
        lines = build.document.lines.len(),
        "Wrote network"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
