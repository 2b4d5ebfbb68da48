mod cache;
mod config;
mod context;
mod render;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use muhurta_time::today_ist;
use muhurta_vedic::NamedLocation;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::context::AppContext;

#[derive(Parser)]
#[command(name = "muhurta", version, about = "Hora and rahu-kaal market timing dashboard")]
struct Cli {
    /// Config file (default: ./muhurta.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Path to SPK kernel, replaces the configured list
    #[arg(long, global = true)]
    bsp: Option<PathBuf>,
    /// Path to leap second kernel
    #[arg(long, global = true)]
    lsk: Option<PathBuf>,
    /// Location slug or name (see `locations`)
    #[arg(long, global = true)]
    location: Option<NamedLocation>,
    /// Target date, YYYY-MM-DD (default: today in IST)
    #[arg(long, global = true)]
    date: Option<NaiveDate>,
    /// Emit JSON instead of text tables
    #[arg(long, global = true)]
    json: bool,
    /// Log filter when MUHURTA_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Header, index cards, headlines, schedule and planner (default)
    Dashboard {
        /// Redraw periodically
        #[arg(long)]
        watch: bool,
        /// Seconds between redraws (default: refresh_secs)
        #[arg(long)]
        interval: Option<u64>,
        /// Skip the news feeds
        #[arg(long)]
        no_news: bool,
    },
    /// Market-hours hora schedule
    Schedule,
    /// Per-index signals for each schedule row
    Planner {
        /// Only this index, e.g. "NIFTY 50"
        #[arg(long)]
        index: Option<String>,
    },
    /// Tithi and its end time
    Tithi {
        /// UTC instant (YYYY-MM-DDThh:mm:ssZ), default: now or market open
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Market headlines
    News,
    /// Known locations
    Locations,
}

impl Default for Commands {
    fn default() -> Self {
        Self::Dashboard {
            watch: false,
            interval: None,
            no_news: false,
        }
    }
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(bsp) = &self.bsp {
            config.ephemeris.spk_paths = vec![bsp.clone()];
        }
        if let Some(lsk) = &self.lsk {
            config.ephemeris.lsk_path = Some(lsk.clone());
        }
        if let Some(location) = self.location {
            config.location = location;
        }
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("MUHURTA_LOG")
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> anyhow::Result<()> {
    if json {
        println!("{}", render::json(value)?);
    } else {
        print!("{}", text(value));
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    let location = config.location;
    let command = cli.command.unwrap_or_default();
    if command == Commands::Locations {
        return show_locations(cli.json, location);
    }

    let mut ctx = AppContext::init(config)?;
    let site = location.geo();
    let now = Utc::now();
    let date = cli.date.unwrap_or_else(|| today_ist(&now));
    let active_now = (date == today_ist(&now)).then_some(&now);

    match command {
        Commands::Dashboard {
            watch,
            interval,
            no_news,
        } => {
            let with_news = ctx.config.news.enabled && !no_news;
            let pause = Duration::from_secs(interval.unwrap_or(ctx.config.refresh_secs).max(1));
            loop {
                let now = Utc::now();
                let date = cli.date.unwrap_or_else(|| today_ist(&now));
                match report::build_dashboard(&mut ctx, date, location, &now, with_news) {
                    Ok(dashboard) => {
                        if watch && !cli.json {
                            print!("\x1b[2J\x1b[H");
                        }
                        emit(cli.json, &dashboard, render::dashboard)?;
                    }
                    Err(e) if watch => {
                        let error = format!("{e:#}");
                        warn!(%error, "refresh failed");
                    }
                    Err(e) => return Err(e),
                }
                if !watch {
                    break;
                }
                info!(secs = pause.as_secs(), "next refresh");
                std::thread::sleep(pause);
            }
        }
        Commands::Schedule => {
            let schedule = ctx.schedule(date, &site)?;
            let rows = report::slot_records(&schedule, active_now);
            emit(cli.json, &rows, |r| render::schedule(r))?;
        }
        Commands::Planner { index } => {
            let schedule = ctx.schedule(date, &site)?;
            let profiles: Vec<_> = ctx
                .config
                .indices
                .iter()
                .filter(|p| index.as_ref().is_none_or(|n| p.name.eq_ignore_ascii_case(n.trim())))
                .collect();
            if let (Some(name), true) = (&index, profiles.is_empty()) {
                anyhow::bail!("unknown index {name:?}");
            }
            let plans: Vec<_> = profiles
                .into_iter()
                .map(|p| report::index_plan(&schedule, p))
                .collect();
            emit(cli.json, &plans, |p| render::planner(p))?;
        }
        Commands::Tithi { at } => {
            let at = match at {
                Some(at) => at,
                None => report::calc_instant(date, &now, ctx.session.open())?,
            };
            let snapshot = ctx.tithi(&at, &site)?;
            emit(cli.json, &snapshot, render::tithi)?;
        }
        Commands::News => {
            let headlines = ctx.headlines();
            emit(cli.json, &headlines, |h| render::headlines(h))?;
        }
        Commands::Locations => show_locations(cli.json, location)?,
    }
    Ok(())
}

fn show_locations(json: bool, selected: NamedLocation) -> anyhow::Result<()> {
    emit(json, &report::location_records(selected), |r| render::locations(r))
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
