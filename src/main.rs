use house_match::config::{LoggingSettings, Settings};
use house_match::core::{side_by_side, CompareSelection, Ranker, SelectionError};
use house_match::models::{
    ComparisonRequest, ComparisonResponse, ErrorResponse, SideBySideRequest, SideBySideResponse,
};
use house_match::services::{load_snapshot, SnapshotError};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;
use validator::Validate;

const USAGE: &str =
    "usage: house-match <snapshot.json|snapshot.toml> [--min-score N] [--limit N] [--compare ID,ID,...]";

/// Errors surfaced by the command line tool
#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("Invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    fn kind(&self) -> &'static str {
        match self {
            CliError::Usage(_) => "invalid_arguments",
            CliError::Config(_) => "invalid_config",
            CliError::Snapshot(_) => "invalid_snapshot",
            CliError::Validation(_) => "invalid_request",
            CliError::Selection(_) => "invalid_selection",
            CliError::Output(_) => "output_error",
        }
    }
}

#[derive(Debug, Default)]
struct CliArgs {
    snapshot: PathBuf,
    min_score: Option<u8>,
    limit: Option<usize>,
    compare: Vec<String>,
}

fn parse_args<I>(mut args: I) -> Result<CliArgs, CliError>
where
    I: Iterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut snapshot = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--min-score" => parsed.min_score = Some(parse_value(&arg, args.next())?),
            "--limit" => parsed.limit = Some(parse_value(&arg, args.next())?),
            "--compare" => {
                let ids: String = parse_value(&arg, args.next())?;
                parsed.compare = ids
                    .split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "-h" | "--help" => return Err(CliError::Usage(USAGE.to_string())),
            flag if flag.starts_with("--") => {
                return Err(CliError::Usage(format!("unknown option {}\n{}", flag, USAGE)));
            }
            path if snapshot.is_none() => snapshot = Some(PathBuf::from(path)),
            extra => return Err(CliError::Usage(format!("unexpected argument {}\n{}", extra, USAGE))),
        }
    }

    parsed.snapshot = snapshot.ok_or_else(|| CliError::Usage(USAGE.to_string()))?;
    Ok(parsed)
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, CliError> {
    value
        .as_deref()
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| CliError::Usage(format!("{} expects a value\n{}", flag, USAGE)))
}

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn rank(args: CliArgs, settings: &Settings) -> Result<String, CliError> {
    let snapshot = load_snapshot(&args.snapshot)?;

    let request = ComparisonRequest {
        properties: snapshot.properties,
        wishlists: snapshot.wishlists,
        min_score: args.min_score.unwrap_or(settings.comparison.min_score),
        limit: args.limit.or(settings.comparison.limit),
    };
    request.validate()?;

    let mut ranker = Ranker::new(request.min_score);
    if let Some(limit) = request.limit {
        ranker = ranker.with_limit(limit);
    }

    let result = ranker.rank(&request.properties, &request.wishlists);
    info!("Ranked {} of {} properties", result.entries.len(), result.total_properties);

    let response = ComparisonResponse {
        total_results: result.entries.len(),
        matches: result.entries,
        total_properties: result.total_properties,
        generated_at: chrono::Utc::now(),
    };
    Ok(serde_json::to_string_pretty(&response)?)
}

fn compare(args: CliArgs, settings: &Settings) -> Result<String, CliError> {
    let request = SideBySideRequest {
        property_ids: args.compare,
    };
    request.validate()?;

    let mut selection = CompareSelection::new(settings.comparison.max_compare_items);
    for id in &request.property_ids {
        if !selection.contains(id) {
            selection.toggle(id)?;
        }
    }

    let snapshot = load_snapshot(&args.snapshot)?;
    let result = side_by_side(selection.ids(), &snapshot.properties, &snapshot.wishlists)?;
    info!("Comparing {} properties side by side", result.columns.len());

    let response = SideBySideResponse {
        columns: result.columns,
        missing_property_ids: result.missing_ids,
    };
    Ok(serde_json::to_string_pretty(&response)?)
}

fn run() -> Result<String, CliError> {
    let args = parse_args(std::env::args().skip(1))?;

    let settings = Settings::load()?;
    init_logging(&settings.logging);
    info!("Configuration loaded successfully");

    if args.compare.is_empty() {
        rank(args, &settings)
    } else {
        compare(args, &settings)
    }
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    match run() {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            let response = ErrorResponse {
                error: e.kind().to_string(),
                message: e.to_string(),
            };
            match serde_json::to_string_pretty(&response) {
                Ok(body) => eprintln!("{}", body),
                Err(_) => eprintln!("{}", e),
            }
            ExitCode::FAILURE
        }
    }
}
