//! Ephemeris engine for the timing pipeline.
//!
//! [`Engine`] loads SPK kernels and a leapseconds table once and computes
//! apparent topocentric places of the Sun and Moon (see [`apparent`]),
//! chaining SPK segments to the solar system barycenter across all loaded
//! kernels. Downstream crates consume it through the [`Ephemeris`] trait.

pub mod apparent;
pub mod ephemeris;
pub mod error;
pub mod observer;

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;

use jpl_kernel::{KernelError, SpkEvaluation, SpkKernel};
use muhurta_time::LeapSecondKernel;
use tracing::{debug, info};

pub use apparent::{ApparentPlace, SPEED_OF_LIGHT_KM_S};
pub use ephemeris::Ephemeris;
pub use error::EngineError;
pub use muhurta_frames::SphericalCoords;
pub use observer::GeoLocation;

/// Engine configuration used at startup time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// SPK kernels, searched in order.
    pub spk_paths: Vec<PathBuf>,
    /// Leapseconds kernel; the built-in table is used when `None`.
    pub lsk_path: Option<PathBuf>,
}

impl EngineConfig {
    /// Convenience constructor for single-kernel use.
    pub fn with_single_spk(spk_path: PathBuf, lsk_path: Option<PathBuf>) -> Self {
        Self {
            spk_paths: vec![spk_path],
            lsk_path,
        }
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.spk_paths.is_empty() {
            return Err(EngineError::InvalidConfig("spk_paths must not be empty"));
        }
        if self.spk_paths.iter().any(|p| p.as_os_str().is_empty()) {
            return Err(EngineError::InvalidConfig(
                "spk_paths must not contain empty paths",
            ));
        }
        if self
            .lsk_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(EngineError::InvalidConfig("lsk_path must not be empty"));
        }
        Ok(())
    }
}

/// Bodies the engine resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Earth,
    Moon,
}

impl Body {
    /// NAIF body code.
    pub const fn code(self) -> i32 {
        match self {
            Self::Sun => 10,
            Self::Earth => 399,
            Self::Moon => 301,
        }
    }
}

/// Per-request memoization of segment evaluations.
///
/// Keys use `epoch_tdb_s.to_bits()`: within one request the same epoch is
/// always produced by the same arithmetic, so equal epochs are bit-identical.
struct ComputationContext {
    cache: HashMap<(i32, i32, u64), SpkEvaluation>,
    evaluations: u32,
    cache_hits: u32,
}

impl ComputationContext {
    fn new() -> Self {
        Self {
            cache: HashMap::with_capacity(8),
            evaluations: 0,
            cache_hits: 0,
        }
    }
}

/// Core ephemeris engine, immutable after construction.
pub struct Engine {
    config: EngineConfig,
    spk_kernels: Vec<SpkKernel>,
    lsk: LeapSecondKernel,
}

impl Debug for Engine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let segments: usize = self.spk_kernels.iter().map(|k| k.segments().len()).sum();
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("spk_kernel_count", &self.spk_kernels.len())
            .field("spk_total_segments", &segments)
            .finish()
    }
}

impl Engine {
    /// Load all kernels named by `config`.
    ///
    /// Any unreadable or malformed kernel is [`EngineError::DataUnavailable`].
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut spk_kernels = Vec::with_capacity(config.spk_paths.len());
        for path in &config.spk_paths {
            let spk = SpkKernel::load(path)
                .map_err(|e| EngineError::DataUnavailable(format!("{}: {e}", path.display())))?;
            spk_kernels.push(spk);
        }
        let lsk = match &config.lsk_path {
            Some(path) => LeapSecondKernel::load(path)
                .map_err(|e| EngineError::DataUnavailable(format!("{}: {e}", path.display())))?,
            None => LeapSecondKernel::builtin()
                .map_err(|e| EngineError::DataUnavailable(format!("built-in LSK: {e}")))?,
        };
        info!(
            kernels = spk_kernels.len(),
            builtin_lsk = config.lsk_path.is_none(),
            "ephemeris engine ready"
        );
        Ok(Self::from_parts(config, spk_kernels, lsk))
    }

    /// Assemble an engine from already-loaded kernels.
    pub fn from_parts(
        config: EngineConfig,
        spk_kernels: Vec<SpkKernel>,
        lsk: LeapSecondKernel,
    ) -> Self {
        Self {
            config,
            spk_kernels,
            lsk,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn spk_kernels(&self) -> &[SpkKernel] {
        &self.spk_kernels
    }

    pub fn lsk(&self) -> &LeapSecondKernel {
        &self.lsk
    }

    fn evaluate_across(
        &self,
        target: i32,
        center: i32,
        epoch_tdb_s: f64,
        ctx: &mut ComputationContext,
    ) -> Result<SpkEvaluation, KernelError> {
        let key = (target, center, epoch_tdb_s.to_bits());
        if let Some(cached) = ctx.cache.get(&key) {
            ctx.cache_hits += 1;
            return Ok(*cached);
        }

        let mut last_err = KernelError::SegmentNotFound { target, center };
        for kernel in &self.spk_kernels {
            match kernel.evaluate(target, center, epoch_tdb_s) {
                Ok(eval) => {
                    ctx.evaluations += 1;
                    ctx.cache.insert(key, eval);
                    return Ok(eval);
                }
                Err(e @ KernelError::EpochOutOfRange { .. }) => last_err = e,
                Err(KernelError::SegmentNotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Err(last_err)
    }

    fn center_for_across(&self, target: i32) -> Option<i32> {
        self.spk_kernels.iter().find_map(|k| k.center_for(target))
    }

    /// Walk the segment chain of `body_code` to the SSB across all kernels.
    fn resolve_to_ssb_across(
        &self,
        body_code: i32,
        epoch_tdb_s: f64,
        ctx: &mut ComputationContext,
    ) -> Result<[f64; 6], KernelError> {
        let state = jpl_kernel::resolve_chain(
            body_code,
            |code| self.center_for_across(code),
            |target, center| self.evaluate_across(target, center, epoch_tdb_s, ctx),
        )?;
        debug!(
            body = body_code,
            evaluations = ctx.evaluations,
            cache_hits = ctx.cache_hits,
            "resolved to barycenter"
        );
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_rejects_empty_spk_paths() {
        let config = EngineConfig {
            spk_paths: vec![],
            lsk_path: None,
        };
        assert!(matches!(
            Engine::new(config),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn engine_rejects_empty_paths() {
        let config = EngineConfig::with_single_spk(PathBuf::new(), None);
        assert!(matches!(
            Engine::new(config),
            Err(EngineError::InvalidConfig(_))
        ));
        let config = EngineConfig::with_single_spk("de421.bsp".into(), Some(PathBuf::new()));
        assert!(matches!(
            Engine::new(config),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn missing_kernel_is_data_unavailable() {
        let config = EngineConfig::with_single_spk("/nonexistent/de421.bsp".into(), None);
        match Engine::new(config) {
            Err(EngineError::DataUnavailable(msg)) => assert!(msg.contains("de421.bsp")),
            other => panic!("expected DataUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn body_codes_are_naif_ids() {
        assert_eq!(Body::Sun.code(), 10);
        assert_eq!(Body::Earth.code(), 399);
        assert_eq!(Body::Moon.code(), 301);
    }

    // Compile-time assertion: Engine must be Send + Sync.
    #[allow(dead_code)]
    const _: () = {
        fn assert_send_sync<T: Send + Sync>() {}
        fn check() {
            assert_send_sync::<Engine>();
        }
    };
}
