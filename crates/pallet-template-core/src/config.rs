use std::time::Duration;

use crate::error::{EngineError, Result};
use crate::model::{BoxDims, PalletDims};

/// Per-solve search parameters, mirroring the §4.1 contract
/// (`solve_layer(L, W, l, w, time_limit, workers, seed, obstacle?)`).
#[derive(Debug, Clone)]
pub struct SolveRequest {
    pub pallet: PalletDims,
    pub box_dims: BoxDims,
    pub time_limit: Duration,
    pub workers: u32,
    pub seed: Option<u64>,
    pub obstacle: Option<crate::model::Obstacle>,
}

impl SolveRequest {
    /// Validates dimension and budget constraints before any solve attempt
    /// is launched. No solver invocation happens on the invalid path.
    pub fn validate(&self) -> Result<()> {
        let (l, w) = (self.box_dims.l, self.box_dims.w);
        if l == 0 || w == 0 || self.pallet.l == 0 || self.pallet.w == 0 {
            return Err(EngineError::InvalidInput(
                "pallet and box dimensions must be strictly positive".into(),
            ));
        }
        if l > self.pallet.l || w > self.pallet.w {
            return Err(EngineError::InvalidInput(format!(
                "box {}x{} does not fit pallet {}x{}",
                l, w, self.pallet.l, self.pallet.w
            )));
        }
        if self.time_limit.is_zero() {
            return Err(EngineError::InvalidInput(
                "time_limit must be greater than zero".into(),
            ));
        }
        if self.workers == 0 {
            return Err(EngineError::InvalidInput(
                "workers must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Top-level configuration for `generate`: how many distinct templates to
/// look for, how hard to search for each layer, and the tunables behind the
/// diversification loop's obstacle draw (§9: "document as a tunable").
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub num_solutions: usize,
    pub workers: u32,
    pub seed: Option<u64>,
    pub base_time_limit: Duration,
    pub upper_time_limit: Duration,
    /// Multiplier on `num_solutions` bounding diversification attempts.
    pub diversification_attempts_factor: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            num_solutions: 1,
            workers: 4,
            seed: None,
            base_time_limit: Duration::from_secs(10),
            upper_time_limit: Duration::from_secs(5),
            diversification_attempts_factor: 5,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_solutions == 0 {
            return Err(EngineError::InvalidInput(
                "num_solutions must be greater than zero".into(),
            ));
        }
        if self.workers == 0 {
            return Err(EngineError::InvalidInput(
                "workers must be greater than zero".into(),
            ));
        }
        if self.base_time_limit.is_zero() || self.upper_time_limit.is_zero() {
            return Err(EngineError::InvalidInput(
                "time limits must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }
}

/// Fluent builder for `EngineConfig`.
#[derive(Debug, Default, Clone)]
pub struct EngineConfigBuilder {
    cfg: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: EngineConfig::default(),
        }
    }
    pub fn num_solutions(mut self, v: usize) -> Self {
        self.cfg.num_solutions = v;
        self
    }
    pub fn workers(mut self, v: u32) -> Self {
        self.cfg.workers = v;
        self
    }
    pub fn seed(mut self, v: Option<u64>) -> Self {
        self.cfg.seed = v;
        self
    }
    pub fn base_time_limit(mut self, v: Duration) -> Self {
        self.cfg.base_time_limit = v;
        self
    }
    pub fn upper_time_limit(mut self, v: Duration) -> Self {
        self.cfg.upper_time_limit = v;
        self
    }
    pub fn diversification_attempts_factor(mut self, v: usize) -> Self {
        self.cfg.diversification_attempts_factor = v;
        self
    }
    pub fn build(self) -> EngineConfig {
        self.cfg
    }
}
