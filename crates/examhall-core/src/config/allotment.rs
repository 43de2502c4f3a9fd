//! Seat allotment engine configuration.

use serde::{Deserialize, Serialize};

/// Tuning for the seat assignment heuristic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllotmentConfig {
    /// How many positions past the current candidate the anti-clustering
    /// swap may look for a student of a different department.
    #[serde(default = "default_lookahead_window")]
    pub lookahead_window: usize,
    /// Fixed seed for the shuffle. When unset the generator is seeded from
    /// the operating system.
    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

impl Default for AllotmentConfig {
    fn default() -> Self {
        Self {
            lookahead_window: default_lookahead_window(),
            shuffle_seed: None,
        }
    }
}

fn default_lookahead_window() -> usize {
    9
}
