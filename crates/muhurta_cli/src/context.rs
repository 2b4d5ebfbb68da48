//! Process state built once at startup.

use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use muhurta_core::{Engine, EngineConfig, GeoLocation};
use muhurta_feed::{FeedTransport, Headline, HttpTransport, fetch_headlines};
use muhurta_vedic::{
    DaySchedule, MarketSession, RiseSetConfig, TithiInfo, VedicError, compute_day_schedule,
    tithi_at, tithi_end,
};
use serde::Serialize;
use tracing::warn;

use crate::cache::TtlCache;
use crate::config::AppConfig;

/// Tithi at an instant with its end time, if found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TithiSnapshot {
    pub info: TithiInfo,
    pub ends: Option<DateTime<Utc>>,
}

type SiteKey = (u64, u64);

pub struct AppContext {
    pub config: AppConfig,
    pub session: MarketSession,
    pub riseset: RiseSetConfig,
    engine: Engine,
    transport: Box<dyn FeedTransport>,
    schedules: TtlCache<(NaiveDate, SiteKey), DaySchedule>,
    tithis: TtlCache<(i64, SiteKey), TithiSnapshot>,
    headlines: TtlCache<(), Vec<Headline>>,
}

impl AppContext {
    /// Load the ephemeris and build the HTTP client.
    pub fn init(config: AppConfig) -> anyhow::Result<Self> {
        let engine = Engine::new(EngineConfig {
            spk_paths: config.ephemeris.spk_paths.clone(),
            lsk_path: config.ephemeris.lsk_path.clone(),
        })
        .context("failed to load ephemeris")?;
        let transport = HttpTransport::new(Duration::from_secs(config.news.timeout_secs))
            .context("failed to build HTTP client")?;
        Self::with_parts(config, engine, Box::new(transport))
    }

    pub fn with_parts(
        config: AppConfig,
        engine: Engine,
        transport: Box<dyn FeedTransport>,
    ) -> anyhow::Result<Self> {
        let session = config.market_session()?;
        let ttl = |secs| Duration::from_secs(secs);
        Ok(Self {
            session,
            riseset: RiseSetConfig::default(),
            schedules: TtlCache::new("schedule", ttl(config.cache.schedule_ttl_secs)),
            tithis: TtlCache::new("tithi", ttl(config.cache.tithi_ttl_secs)),
            headlines: TtlCache::new("headlines", ttl(config.cache.headlines_ttl_secs)),
            config,
            engine,
            transport,
        })
    }

    pub fn schedule(&mut self, date: NaiveDate, site: &GeoLocation) -> Result<DaySchedule, VedicError> {
        let (engine, session, riseset) = (&self.engine, &self.session, &self.riseset);
        self.schedules
            .get_or_try_insert_with((date, site.key()), Instant::now(), || {
                compute_day_schedule(engine, date, site, session, riseset)
            })
    }

    /// Tithi at `at`; cached per minute and site.
    pub fn tithi(&mut self, at: &DateTime<Utc>, site: &GeoLocation) -> Result<TithiSnapshot, VedicError> {
        let engine = &self.engine;
        let minute = at.timestamp().div_euclid(60);
        self.tithis
            .get_or_try_insert_with((minute, site.key()), Instant::now(), || {
                let info = tithi_at(engine, at, site)?;
                let ends = match tithi_end(engine, at, site, TimeDelta::seconds(1)) {
                    Ok(end) => Some(end),
                    Err(e) => {
                        warn!(error = %e, "tithi end not found");
                        None
                    }
                };
                Ok(TithiSnapshot { info, ends })
            })
    }

    pub fn headlines(&mut self) -> Vec<Headline> {
        let (transport, news) = (self.transport.as_ref(), &self.config.news);
        self.headlines.get_or_insert_with((), Instant::now(), || {
            fetch_headlines(transport, &news.sources, news.per_source)
        })
    }
}
