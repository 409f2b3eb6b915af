use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use aso_score::batch::{self, ScoreKind, ScoringInput};
use aso_score::output::{self, ScoredKeyword};
use aso_score::scoring::TrafficAggregator;
use aso_score::signals::{top_competitors, TOP_COMPETITORS};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_INTERNAL: i32 = 5;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum Format {
    #[default]
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score how hard it is to rank for each keyword
    Difficulty {
        /// Keyword snapshot file (.json, .yaml or .yml)
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Score the search traffic potential of each keyword
    Traffic {
        /// Keyword snapshot file (.json, .yaml or .yml)
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// List the apps that rank for the most keywords
    Competitors {
        /// Keyword snapshot file (.json, .yaml or .yml)
        #[arg(short, long)]
        input: PathBuf,

        /// Store id of your own app, left out of the list
        #[arg(long)]
        app_id: Option<String>,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
}

#[derive(Parser, Debug)]
#[command(name = "aso-score")]
#[command(about = "Keyword difficulty and traffic scoring for app stores", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging and per-component breakdowns
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/aso-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "aso_score=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn load_input_or_exit(path: &Path) -> ScoringInput {
    let input = match batch::load_input(path) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    if input.keywords.is_empty() {
        eprintln!("No keywords in {}.", path.display());
        std::process::exit(EXIT_INPUT);
    }
    input
}

fn run_competitors(input: &ScoringInput, app_id: Option<&str>, format: Format) {
    let competitors = top_competitors(&input.keywords, app_id, TOP_COMPETITORS);

    match format {
        Format::Table => println!(
            "{}",
            output::format_competitor_table(&competitors, output::should_use_colors())
        ),
        Format::Tsv => println!("{}", output::format_competitor_tsv(&competitors)),
        Format::Json => match output::format_competitor_json(&competitors) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to encode JSON: {}", e);
                std::process::exit(EXIT_INTERNAL);
            }
        },
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let start_time = Instant::now();

    let (kind, input_path, format) = match cli.command {
        Commands::Difficulty { input, format } => (ScoreKind::Difficulty, input, format),
        Commands::Traffic { input, format } => (ScoreKind::Traffic, input, format),
        Commands::Competitors { input, app_id, format } => {
            let input = load_input_or_exit(&input);
            run_competitors(&input, app_id.as_deref(), format);
            std::process::exit(EXIT_SUCCESS);
        }
    };

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match aso_score::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let effective_scoring = config.effective_scoring();
    if let Err(errors) = aso_score::scoring::validate_scoring(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let aggregator = match TrafficAggregator::new(&effective_scoring) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Scoring config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let input = load_input_or_exit(&input_path);

    let outcome = batch::score_batch(&input, kind, &aggregator, chrono::Utc::now());

    for (keyword, error) in &outcome.failed {
        eprintln!("Skipped '{}': {}", keyword, error);
    }

    // If every keyword failed, exit with input error
    if outcome.scored.is_empty() {
        eprintln!("No keywords could be scored.");
        std::process::exit(EXIT_INPUT);
    }

    let rows: Vec<ScoredKeyword> = outcome
        .scored
        .iter()
        .map(|(keyword, result)| ScoredKeyword { keyword, result })
        .collect();

    match format {
        Format::Table => {
            let use_colors = output::should_use_colors();
            if cli.verbose {
                // Verbose mode: table row followed by its breakdown
                for (idx, row) in rows.iter().enumerate() {
                    println!("{}", output::format_scored_line(idx + 1, row, use_colors));
                    println!("{}", output::format_breakdown(row.result, use_colors));
                }
            } else {
                println!("{}", output::format_scored_table(&rows, use_colors));
            }
        }
        Format::Tsv => println!("{}", output::format_tsv(&rows)),
        Format::Json => match output::format_json(&rows) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to encode JSON: {}", e);
                std::process::exit(EXIT_INTERNAL);
            }
        },
    }

    tracing::debug!(
        scored = outcome.scored.len(),
        failed = outcome.failed.len(),
        elapsed = ?start_time.elapsed(),
        "done"
    );

    std::process::exit(EXIT_SUCCESS);
}
