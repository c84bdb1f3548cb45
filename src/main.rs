use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{EnvFilter, fmt};

use crowdscan::config::{FileConfig, GeminiConfig};
use crowdscan::domain::{Coordinates, ViewMode};
use crowdscan::location::{LocationRequest, LocationStatus, acquire};
use crowdscan::render::RenderOptions;
use crowdscan::search::{SearchSession, SearchState};
use crowdscan::shell::{Shell, create_spinner, render_state, scan_with_spinner};
use crowdscan::{GeminiClient, geocode};

/// Scan for crowded places using Gemini with Google Maps grounding
///
/// Examples:
///   # Interactive scanner, biased towards a geocoded neighbourhood
///   crowdscan --near "Shibuya, Tokyo"
///
///   # One-shot scan at explicit coordinates
///   crowdscan "rooftop bars" --lat 40.7128 --lon -74.0060
///
///   # Compact list, or JSON for scripting
///   crowdscan "coffee shops" --view list
///   crowdscan "parks" --json
///
/// The API key is read from GEMINI_API_KEY (configurable via [gemini] api_key_env).
#[derive(Parser, Debug)]
#[command(name = "crowdscan")]
#[command(version, about, long_about = None)]
struct Args {
    /// What to scan for; starts the interactive shell when omitted
    query: Option<String>,

    /// Path to config file (optional, auto-searches crowdscan.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Latitude of your position (use with --lon)
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of your position (use with --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Place name to geocode as your position (e.g. "Soho, London")
    #[arg(long, conflicts_with = "lat")]
    near: Option<String>,

    /// Gemini model identifier
    #[arg(long)]
    model: Option<String>,

    /// Result layout
    #[arg(long, value_enum)]
    view: Option<ViewMode>,

    /// Print results as JSON (one-shot mode only)
    #[arg(long, requires = "query")]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "crowdscan=debug" } else { "crowdscan=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let file_config = if let Some(ref config_path) = args.config {
        if !config_path.exists() {
            bail!("Config file not found: {:?}", config_path);
        }
        Some(FileConfig::load_from(config_path)?)
    } else {
        FileConfig::load()
    };

    let coordinates = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Some((lat, lon)),
        _ if args.near.is_some() => None,
        _ => file_config.as_ref().and_then(|c| c.coordinates()),
    };
    let near = args
        .near
        .clone()
        .or_else(|| file_config.as_ref().and_then(|c| c.near.clone()));
    let view = args
        .view
        .or_else(|| file_config.as_ref().and_then(|c| c.view))
        .unwrap_or_default();
    let color = !args.no_color
        && file_config.as_ref().and_then(|c| c.color).unwrap_or(true)
        && io::stdout().is_terminal();

    let mut gemini_config: GeminiConfig = file_config
        .as_ref()
        .and_then(|c| c.gemini.clone())
        .unwrap_or_default();
    if let Some(model) = args.model.clone() {
        gemini_config.model = model;
    }

    tracing::debug!(?coordinates, ?near, ?view, color, model = %gemini_config.model, "configuration resolved");

    let request = match (coordinates, near) {
        (Some(c), _) => LocationRequest::Coordinates(Coordinates::from(c)),
        (None, Some(place)) => LocationRequest::Near(place),
        (None, None) => LocationRequest::Unset,
    };
    let location = locate(request);

    let client = GeminiClient::new(gemini_config).context("Failed to set up Gemini client")?;
    let options = RenderOptions { color };

    match args.query {
        Some(query) => run_once(&client, location, &query, view, options, args.json),
        None => {
            println!("crowdscan - Crowd Radar");
            println!("=======================");
            println!();
            let mut shell = Shell::new(&client, location, view, options);
            let stdin = io::stdin();
            shell
                .run(stdin.lock(), &mut io::stdout())
                .context("Interactive shell failed")
        }
    }
}

fn locate(request: LocationRequest) -> LocationStatus {
    if let LocationRequest::Near(ref place) = request {
        let spinner = create_spinner(&format!("Locating {}...", place));
        let start = Instant::now();
        let status = acquire(request.clone(), geocode);
        match &status {
            LocationStatus::Locked(c) => spinner.finish_with_message(format!(
                "Location locked: {} [{:.1}s]",
                c,
                start.elapsed().as_secs_f32()
            )),
            LocationStatus::Unavailable(reason) => spinner.finish_with_message(reason.to_string()),
        }
        status
    } else {
        acquire(request, geocode)
    }
}

fn run_once(
    client: &GeminiClient,
    location: LocationStatus,
    query: &str,
    view: ViewMode,
    options: RenderOptions,
    json: bool,
) -> Result<()> {
    if query.trim().is_empty() {
        bail!("Query must not be empty");
    }

    let mut session = SearchSession::new(location.coordinates());
    let state = scan_with_spinner(&mut session, client, Some(query))
        .cloned()
        .unwrap_or_default();

    match &state {
        SearchState::Succeeded(result) if json => {
            let out = serde_json::to_string_pretty(result).context("Failed to encode results")?;
            println!("{}", out);
        }
        SearchState::Succeeded(_) => println!("{}", render_state(&state, view, &options)),
        SearchState::Failed(message) => bail!("{}", message),
        SearchState::Idle | SearchState::Searching { .. } => {}
    }

    Ok(())
}
