//! CLI interface for FishID.
//!
//! Each subcommand is non-interactive: arguments in, output out.
//! Human-readable text by default; `--json` prints structured JSON instead.
//!
//! Config and storage are opened only by the commands that use them, so
//! `classify` and `--help` work even when `config.toml` is broken.
//!
//! Collaborator failures never abort a command that has something to show:
//! a failed identification prints its failure message, a failed shop search
//! prints no shops, an unavailable weather service prints an unavailable state.

mod format;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::assistant::Gemini;
use crate::classify::{classify_risk, freshness_grade, quality_grade};
use crate::config::{self, Config};
use crate::location::{self, FixedLocator};
use crate::model::Location;
use crate::scan::{self, ScanImage, ScanOutcome};
use crate::storage::{self, Storage};
use crate::weather::OpenMeteo;
use crate::{chat, marine, shops};

/// FishID: identify your catch, check the sea.
#[derive(Debug, Parser)]
#[command(name = "fishid", after_long_help = USAGE_HELP)]
pub struct Cli {
    /// Print structured JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// API key for the generative-AI service.
    /// Overrides `FISHID_API_KEY` and the config file.
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

const USAGE_HELP: &str = r"Examples:
  fishid identify catch.jpg
  fishid weather --lat 9.93 --lng 76.26
  fishid shops
  fishid chat send 'Best season for pomfret?'
  fishid classify risk --wave 3.0 --wind 45
  fishid history list --json";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Identify a fish from a photo and grade its freshness and quality.
    ///
    /// Successful identifications are added to the scan history.
    Identify {
        /// Image file (PNG or JPEG).
        image: PathBuf,

        /// Don't record this scan in the history.
        #[arg(long)]
        no_history: bool,
    },

    /// Show current marine weather and its risk status.
    ///
    /// Without coordinates, uses the configured default location,
    /// then a built-in fallback.
    Weather {
        #[command(flatten)]
        at: LocationArgs,
    },

    /// Find fishing-supply shops nearby.
    Shops {
        #[command(flatten)]
        at: LocationArgs,
    },

    /// Talk to the fishing assistant.
    Chat {
        #[command(subcommand)]
        command: ChatCommand,
    },

    /// Manage the scan history.
    History {
        #[command(subcommand)]
        command: HistoryCommand,
    },

    /// Print this installation's user ID, generating it on first use.
    User,

    /// Classify raw measurements without calling any service.
    Classify {
        #[command(subcommand)]
        command: ClassifyCommand,
    },
}

#[derive(Debug, Args)]
pub struct LocationArgs {
    /// Latitude in decimal degrees.
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude in decimal degrees.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,
}

impl LocationArgs {
    fn given(&self) -> Option<Location> {
        Some(Location {
            lat: self.lat?,
            lng: self.lng?,
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum ChatCommand {
    /// Send a message and print the reply.
    Send {
        /// Your message.
        message: String,
    },

    /// Print the conversation so far.
    Show,

    /// Forget the conversation.
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List recent scans, newest first.
    List,

    /// Remove all recorded scans.
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum ClassifyCommand {
    /// Risk tier from wave height and wind speed.
    Risk {
        /// Wave height in meters.
        #[arg(long, allow_negative_numbers = true)]
        wave: f64,

        /// Wind speed in km/h.
        #[arg(long, allow_negative_numbers = true)]
        wind: f64,
    },

    /// Freshness grade from a 0–100 score.
    Freshness {
        #[arg(allow_negative_numbers = true)]
        score: i64,
    },

    /// Quality grade from a 0–100 score.
    Quality {
        #[arg(allow_negative_numbers = true)]
        score: i64,
    },
}

/// A label and its style hint, as printed by `classify`.
#[derive(Debug, Serialize)]
struct Classified {
    label: &'static str,
    style: &'static str,
}

/// Run a parsed command line, returning an error message on failure.
pub fn run(cli: Cli) -> Result<(), String> {
    let json = cli.json;
    let api_key = cli.api_key.as_deref();

    match cli.command {
        Command::Identify { image, no_history } => {
            let config = load_config()?;
            let assistant = gemini(&config, api_key)?;
            cmd_identify(&assistant, &open_storage()?, &image, no_history, json)
        }
        Command::Weather { at } => cmd_weather(&load_config()?, &at, json),
        Command::Shops { at } => {
            let config = load_config()?;
            let assistant = gemini(&config, api_key)?;
            cmd_shops(&config, &assistant, &at, json)
        }
        Command::Chat { command } => match command {
            ChatCommand::Send { message } => {
                let config = load_config()?;
                let assistant = gemini(&config, api_key)?;
                cmd_chat_send(&config, &assistant, &open_storage()?, &message)
            }
            ChatCommand::Show => cmd_chat_show(&open_storage()?, json),
            ChatCommand::Clear => storage::clear_transcript(&open_storage()?)
                .map_err(|e| format!("failed to clear conversation: {e}")),
        },
        Command::History { command } => match command {
            HistoryCommand::List => cmd_history_list(&open_storage()?, json),
            HistoryCommand::Clear => storage::clear_history(&open_storage()?)
                .map_err(|e| format!("failed to clear history: {e}")),
        },
        Command::User => cmd_user(&open_storage()?),
        Command::Classify { command } => cmd_classify(&command, json),
    }
}

fn load_config() -> Result<Config, String> {
    Config::load().map_err(|e| format!("failed to load config: {e}"))
}

fn open_storage() -> Result<Storage, String> {
    let root = Storage::default_root()
        .ok_or_else(|| "could not determine home directory".to_string())?;
    Storage::new(root).map_err(|e| format!("failed to initialize storage: {e}"))
}

fn gemini(config: &Config, api_key: Option<&str>) -> Result<Gemini, String> {
    Gemini::new(
        config.resolve_api_key(api_key),
        config.model.clone(),
        Duration::from_secs(config.timeout_secs),
    )
    .map_err(|e| format!("failed to set up assistant client: {e}"))
}

fn cmd_identify(
    assistant: &Gemini,
    storage: &Storage,
    path: &Path,
    no_history: bool,
    json: bool,
) -> Result<(), String> {
    let image = ScanImage::from_path(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

    match scan::identify(assistant, &image) {
        ScanOutcome::Identified(result) => {
            if !no_history && let Err(e) = scan::record(storage, &image, &result) {
                tracing::warn!(error = %e, "failed to record scan in history");
            }
            if json {
                print_json(&result)?;
            } else {
                println!("{}", format::format_fish_result(&result));
            }
            Ok(())
        }
        ScanOutcome::Failed(failure) => {
            if json {
                print_json(&serde_json::json!({ "error": failure.to_string() }))?;
                Ok(())
            } else {
                Err(failure.to_string())
            }
        }
    }
}

fn cmd_weather(config: &Config, at: &LocationArgs, json: bool) -> Result<(), String> {
    let (location, source) = location::resolve(&FixedLocator(at.given()), config.default_location);
    let weather = OpenMeteo::new(Duration::from_secs(config.timeout_secs))
        .map_err(|e| format!("failed to set up weather client: {e}"))?;

    match marine::report(&weather, location) {
        Ok(report) => {
            if json {
                print_json(&report)?;
            } else {
                println!("{}", format::format_weather_report(&report, source));
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "marine weather unavailable");
            if json {
                print_json(&serde_json::json!({ "location": location, "error": e.to_string() }))?;
            } else {
                println!("Marine weather unavailable for {location} ({source}): {e}");
            }
        }
    }
    Ok(())
}

fn cmd_shops(
    config: &Config,
    assistant: &Gemini,
    at: &LocationArgs,
    json: bool,
) -> Result<(), String> {
    let (location, source) = location::resolve(&FixedLocator(at.given()), config.default_location);

    let shops = shops::find_nearby(assistant, location).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "shop search failed");
        Vec::new()
    });

    if json {
        print_json(&shops)?;
    } else {
        println!("{}", format::format_shops(&shops, location, source));
    }
    Ok(())
}

fn cmd_chat_send(
    config: &Config,
    assistant: &Gemini,
    storage: &Storage,
    message: &str,
) -> Result<(), String> {
    // Config::load validates the code, so the name is always found.
    let language = config::language_name(&config.language).unwrap_or("English");
    let reply = chat::send(assistant, storage, language, message).map_err(|e| e.to_string())?;
    println!("{reply}");
    Ok(())
}

fn cmd_chat_show(storage: &Storage, json: bool) -> Result<(), String> {
    let transcript = storage::load_transcript(storage)
        .map_err(|e| format!("failed to load conversation: {e}"))?;
    if json {
        print_json(&transcript)
    } else {
        println!("{}", format::format_transcript(&transcript));
        Ok(())
    }
}

fn cmd_history_list(storage: &Storage, json: bool) -> Result<(), String> {
    let items =
        storage::load_history(storage).map_err(|e| format!("failed to load history: {e}"))?;
    if json {
        return print_json(&items);
    }
    if items.is_empty() {
        println!("No scans");
        return Ok(());
    }
    for item in &items {
        println!("{}", format::format_history_item(item));
    }
    Ok(())
}

fn cmd_user(storage: &Storage) -> Result<(), String> {
    let id = storage::user_id(storage).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not persist user id; using a temporary one");
        storage::generate_user_id()
    });
    println!("{id}");
    Ok(())
}

fn cmd_classify(command: &ClassifyCommand, json: bool) -> Result<(), String> {
    let classified = match *command {
        ClassifyCommand::Risk { wave, wind } => {
            let status = classify_risk(wave, wind);
            Classified {
                label: status.label(),
                style: status.style(),
            }
        }
        ClassifyCommand::Freshness { score } => {
            let grade = freshness_grade(score);
            Classified {
                label: grade.label(),
                style: grade.style(),
            }
        }
        ClassifyCommand::Quality { score } => {
            let grade = quality_grade(score);
            Classified {
                label: grade.label(),
                style: grade.style(),
            }
        }
    };

    if json {
        print_json(&classified)
    } else {
        println!("{} ({})", classified.label, classified.style);
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("failed to serialize output: {e}"))?;
    println!("{json}");
    Ok(())
}
