//! FinishLine CLI
//!
//! Race outcome prediction from pre-trained ensemble models.

use clap::{Parser, Subcommand};
use finishline::{Config, Result};

#[derive(Parser)]
#[command(name = "finishline")]
#[command(about = "F1 race outcome prediction from pre-trained models", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the finishing order for a race
    Predict {
        /// Track name as listed in the calendar
        track: String,
        /// Use qualifying session results (post-qualifying model)
        #[arg(long)]
        post: bool,
        /// Cache directory for HTML files
        #[arg(long)]
        cache: Option<String>,
        /// Use only cached files (no network requests)
        #[arg(long)]
        offline: bool,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Project final championship standings over the remaining races
    Season {
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// List the season calendar
    Tracks,
    /// Initialize a new project with default config
    Init,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use table, json, or csv.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    // Run command
    let result = match cli.command {
        Commands::Predict {
            track,
            post,
            cache,
            offline,
            format,
        } => commands::predict(&config, &track, post, cache, offline, format),
        Commands::Season { format } => commands::season(&config, format),
        Commands::Tracks => commands::tracks(&config),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use finishline::data::scrapers::qualifying::QualifyingScraper;
    use finishline::data::scrapers::standings::StandingsScraper;
    use finishline::data::TrackTable;
    use finishline::predict::{PredictionEngine, SeasonSimulator};
    use finishline::{DriverCode, FinishlineError, PredictionMode, Track};

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        // Create data directories
        std::fs::create_dir_all("data")?;
        std::fs::create_dir_all("models")?;
        println!("Created data/ and models/ directories");

        println!("\nNext steps:");
        println!("  1. Edit {} to customize settings", config_path);
        println!("  2. Add the driver roster at data/drivers.csv");
        println!("  3. Add the season calendar at data/tracks.toml");
        println!("  4. Copy the exported model bundles into models/");
        println!("  5. Run 'finishline predict \"Monaco\"' to rank a race");

        Ok(())
    }

    pub fn predict(
        config: &Config,
        track_name: &str,
        post: bool,
        cache: Option<String>,
        offline: bool,
        format: OutputFormat,
    ) -> Result<()> {
        use chrono::Datelike;

        let tracks = TrackTable::load(&config.data.tracks_path)?;
        let track = tracks
            .get(track_name)
            .ok_or_else(|| FinishlineError::UnknownTrack(track_name.to_string()))?
            .clone();

        let qualifying = if post {
            // Results go up on qualifying day, the day before the race
            let today = chrono::Local::now().ordinal();
            if track.day > today + 1 {
                return Err(FinishlineError::QualifyingUnavailable {
                    track: track.name.clone(),
                    day: track.day,
                });
            }

            let url = track
                .qualifying_url
                .clone()
                .ok_or_else(|| FinishlineError::NoQualifyingLink(track.name.clone()))?;

            println!("Fetching qualifying results for {}...", track.name);
            let mut scraper = QualifyingScraper::new(&config.http);

            if let Some(cache_dir) = cache {
                println!("Using cache directory: {}", cache_dir);
                scraper = scraper.with_cache(&cache_dir);
            }

            if offline {
                println!("Offline mode: using cached files only");
                scraper = scraper.offline_only(true);
            }

            Some(scraper.fetch(&url)?)
        } else {
            None
        };

        let engine = PredictionEngine::load(config)?;
        let (mode, ranking) = match &qualifying {
            Some(records) => (
                PredictionMode::PostQualifying,
                engine.predict_post(track.id, records)?,
            ),
            None => (PredictionMode::PreQualifying, engine.predict_pre(track.id)?),
        };

        print_ranking(&track, mode, &ranking, format);
        Ok(())
    }

    fn print_ranking(track: &Track, mode: PredictionMode, ranking: &[DriverCode], format: OutputFormat) {
        match format {
            OutputFormat::Table => {
                println!("Predicted finishing order: {} ({})", track.name, mode);
                println!("───────────────────────────────");
                for (i, code) in ranking.iter().enumerate() {
                    println!("  {:>2}. {}", i + 1, code);
                }
            }
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "track": track.name,
                    "mode": format!("{}", mode),
                    "ranking": ranking,
                });
                println!("{}", serde_json::to_string_pretty(&json).unwrap());
            }
            OutputFormat::Csv => {
                println!("position,code");
                for (i, code) in ranking.iter().enumerate() {
                    println!("{},{}", i + 1, code);
                }
            }
        }
    }

    pub fn season(config: &Config, format: OutputFormat) -> Result<()> {
        use chrono::Datelike;

        let tracks = TrackTable::load(&config.data.tracks_path)?;
        let engine = PredictionEngine::load(config)?;

        println!("Fetching current standings...");
        let scraper = StandingsScraper::new(&config.standings.url, &config.http);
        let seed = scraper.fetch()?;
        println!("Fetched {} drivers from the live table", seed.len());

        let today = chrono::Local::now().ordinal();
        let simulator = SeasonSimulator::new(&engine, config.scoring.points.clone());
        let standings = simulator.project(seed, &tracks, today)?;

        match format {
            OutputFormat::Table => {
                println!("\nProjected final standings");
                println!("───────────────────────────────");
                for (i, entry) in standings.entries().iter().enumerate() {
                    println!("  {:>2}. {:<5} {:>4}", i + 1, entry.code, entry.points);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(standings.entries()).unwrap());
            }
            OutputFormat::Csv => {
                println!("position,code,points");
                for (i, entry) in standings.entries().iter().enumerate() {
                    println!("{},{},{}", i + 1, entry.code, entry.points);
                }
            }
        }

        Ok(())
    }

    pub fn tracks(config: &Config) -> Result<()> {
        let tracks = TrackTable::load(&config.data.tracks_path)?;

        println!("Season Calendar");
        println!("───────────────────────────────");
        for track in tracks.iter() {
            let results = if track.qualifying_url.is_some() {
                "results link set"
            } else {
                "no results link"
            };
            println!(
                "  {:>3}  {:<24} day {:>3}  {}",
                track.id.0, track.name, track.day, results
            );
        }

        Ok(())
    }
}
