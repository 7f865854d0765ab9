//! Probe CLI for OGC API - Features / Tiles / Maps services.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ogc_common::BoundingBox;
use ogcapi_client::HttpTransport;
use ogcapi_probe::{probe, ProbeConfig, ProbeReport, ProbeReportFormatter};

#[derive(Parser)]
#[command(name = "ogcapi-probe")]
#[command(about = "Inspect an OGC API - Features / Tiles / Maps service", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "RUST_LOG", default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover a service and list its collections
    Discover {
        /// Landing page URL
        url: String,

        /// Only keep collections with links of this kind (items, styles, map, tiles)
        #[arg(short, long)]
        category: Option<String>,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the tile matrix sets of a service
    Tilesets {
        /// Landing page URL
        url: String,

        #[arg(long)]
        json: bool,
    },

    /// Read one page of features from a collection
    Features {
        /// Landing page URL
        url: String,

        /// Collection id
        collection: String,

        /// Maximum number of features
        #[arg(short, long)]
        limit: Option<u64>,

        /// Spatial filter: minx,miny,maxx,maxy
        #[arg(long, allow_hyphen_values = true)]
        bbox: Option<String>,

        /// CRS of the spatial filter
        #[arg(long)]
        bbox_crs: Option<String>,

        /// Output CRS requested from the server
        #[arg(long)]
        crs: Option<String>,

        /// References whose bbox axes are sent latitude first
        #[arg(long, value_delimiter = ',')]
        swap_axes: Vec<String>,

        #[arg(long)]
        json: bool,
    },

    /// Run a probe described by a YAML file
    Run {
        /// Path to probe YAML file
        #[arg(short, long)]
        config: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

fn init_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().with_target(true).json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn transport_for(config: &ProbeConfig) -> Result<Arc<dyn HttpTransport>> {
    Ok(Arc::new(config.client_config().build_transport()?))
}

fn print_report(report: &ProbeReport, json: bool) -> Result<()> {
    if json {
        println!("{}", ProbeReportFormatter::format_json(report)?);
    } else {
        println!("{}", ProbeReportFormatter::format_table(report));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_json);

    match cli.command {
        Commands::Discover {
            url,
            category,
            json,
        } => {
            let mut config = ProbeConfig::new(url);
            config.category = category;
            config.validate()?;

            let transport = transport_for(&config)?;
            let caps = probe::discover_service(transport, &config).await?;
            let report = ProbeReport {
                service: probe::summarize(&caps),
                tile_matrix_sets: Vec::new(),
                features: None,
            };
            print_report(&report, json)
        }
        Commands::Tilesets { url, json } => {
            let config = ProbeConfig::new(url);
            config.validate()?;

            let transport = transport_for(&config)?;
            let caps = probe::discover_service(transport, &config).await?;
            let rows = probe::tile_matrix_sets(&caps).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{}", ProbeReportFormatter::format_tile_matrix_sets(&rows));
            }
            Ok(())
        }
        Commands::Features {
            url,
            collection,
            limit,
            bbox,
            bbox_crs,
            crs,
            swap_axes,
            json,
        } => {
            let mut config = ProbeConfig::new(url);
            config.collection = Some(collection);
            config.limit = limit;
            config.bbox = bbox
                .as_deref()
                .map(BoundingBox::from_query_value)
                .transpose()?
                .map(|b| b.to_array());
            config.bbox_crs = bbox_crs;
            config.crs = crs;
            config.swap_axes = swap_axes;

            let transport = transport_for(&config)?;
            let report = probe::run(transport, &config).await?;
            match &report.features {
                Some(summary) if !json => {
                    println!("{}", ProbeReportFormatter::format_features(summary));
                    Ok(())
                }
                _ => print_report(&report, json),
            }
        }
        Commands::Run { config, json } => {
            let config = ProbeConfig::from_file(&config)?;
            let transport = transport_for(&config)?;
            let report = probe::run(transport, &config).await?;
            print_report(&report, json)
        }
    }
}
