//! Runtime configuration
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to override:
//!
//! ```json
//! { "speed": 80, "sorting": { "base_ms": 600 }, "seed": 7 }
//! ```

use crate::engine::errors::VizError;
use crate::snapshot::TimingFamily;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Speed slider bounds
pub const MAX_SPEED: u8 = 100;

/// Linear speed → delay mapping for one visualizer family
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub base_ms: f64,
    pub scale_ms: f64,
    pub min_ms: f64,
}

impl Timing {
    /// `base − speed × scale`, clamped to `min_ms`
    pub fn delay(&self, speed: u8) -> Duration {
        let speed = f64::from(speed.min(MAX_SPEED));
        let ms = (self.base_ms - speed * self.scale_ms).max(self.min_ms).max(0.0);
        Duration::from_millis(ms.round() as u64)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            base_ms: 1000.0,
            scale_ms: 9.5,
            min_ms: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    /// Initial slider position, 0–100
    pub speed: u8,
    pub sorting: Timing,
    pub linear: Timing,
    pub tree: Timing,
    /// How often a paused scheduler re-checks the pause flag
    pub poll_interval_ms: u64,
    pub log_capacity: usize,
    /// Frames kept from the last run for stepping back and forth
    pub history_limit: usize,
    /// Length of generated arrays
    pub array_len: usize,
    pub value_min: i64,
    pub value_max: i64,
    pub hash_buckets: usize,
    /// Fixed seed for generated data; random when absent
    pub seed: Option<u64>,
}

impl Default for VizConfig {
    fn default() -> Self {
        VizConfig {
            speed: 50,
            sorting: Timing::default(),
            linear: Timing {
                base_ms: 1000.0,
                scale_ms: 9.0,
                min_ms: 100.0,
            },
            tree: Timing {
                base_ms: 1500.0,
                scale_ms: 14.0,
                min_ms: 100.0,
            },
            poll_interval_ms: 100,
            log_capacity: crate::log::DEFAULT_LOG_CAPACITY,
            history_limit: 20_000,
            array_len: 10,
            value_min: 5,
            value_max: 99,
            hash_buckets: 7,
            seed: None,
        }
    }
}

impl VizConfig {
    pub fn from_json(text: &str) -> Result<Self, VizError> {
        let config: VizConfig = serde_json::from_str(text)?;
        config.validated()
    }

    pub fn load(path: &Path) -> Result<Self, VizError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn timing(&self, family: TimingFamily) -> &Timing {
        match family {
            TimingFamily::Sorting => &self.sorting,
            TimingFamily::Linear => &self.linear,
            TimingFamily::Tree => &self.tree,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    fn validated(mut self) -> Result<Self, VizError> {
        if self.value_min > self.value_max {
            return Err(VizError::InvalidConfig(format!(
                "value_min {} is greater than value_max {}",
                self.value_min, self.value_max
            )));
        }
        if self.hash_buckets == 0 {
            return Err(VizError::InvalidConfig(
                "hash_buckets must be at least 1".to_string(),
            ));
        }
        self.speed = self.speed.min(MAX_SPEED);
        Ok(self)
    }
}
