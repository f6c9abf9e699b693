use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod dataset;
mod error;
mod network;
mod planner;
mod prompt;
mod resolve;
mod route;

use crate::dataset::Dataset;
use crate::network::{Cost, Network, StationId};

/// Plan a subway route between two stations of a static network.
///
/// Station names are fuzzy-matched; omitted names are prompted for
/// interactively.
#[derive(Parser)]
#[command(name = "subway-router", version)]
struct Args {
    /// Start station name
    #[arg(short, long)]
    start: Option<String>,

    /// End station name
    #[arg(short, long)]
    end: Option<String>,

    /// Path to the network dataset
    #[arg(short, long, default_value = "data/manhattan.json")]
    input: PathBuf,

    /// Extra cost charged each time the route changes lines
    #[arg(long, default_value_t = planner::DEFAULT_TRANSFER_PENALTY)]
    transfer_penalty: Cost,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Args::parse())
}

fn run(args: Args) -> ExitCode {
    let dataset = match Dataset::load(&args.input) {
        Ok(dataset) => dataset,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };
    let network = match Network::build(dataset) {
        Ok(network) => network,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };
    info!(
        stations = network.stations().len(),
        lines = network.lines().len(),
        "network ready"
    );

    let Some(start) = resolve_endpoint(&network, args.start.as_deref(), "Start station") else {
        return ExitCode::from(1);
    };
    let Some(end) = resolve_endpoint(&network, args.end.as_deref(), "End station") else {
        return ExitCode::from(1);
    };

    match planner::plan(&network, start, end, args.transfer_penalty) {
        Ok(route) => {
            println!();
            if route.is_empty() {
                println!("Start and end are the same station; no travel needed.");
            } else {
                for step in route::steps(&network, &route) {
                    println!("{step}");
                }
            }
            println!("{}", route::summary(&route));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(1)
        }
    }
}

/// Turn an optional CLI name into a station: resolve it directly when given,
/// fall back to interactive prompting when omitted.
fn resolve_endpoint(network: &Network, name: Option<&str>, label: &str) -> Option<StationId> {
    match name {
        Some(query) => match resolve::resolve(network, query) {
            Ok(station) => {
                println!("{label}: {}", network.station(station).name);
                Some(station)
            }
            Err(err) => {
                eprintln!("Invalid station name: {query} ({err})");
                None
            }
        },
        None => match prompt::select_station(network, label) {
            Ok(Some(station)) => Some(station),
            Ok(None) => {
                eprintln!("No station selected");
                None
            }
            Err(err) => {
                eprintln!("{err}");
                None
            }
        },
    }
}
