use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Knobs for a list-generation run.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListsConfig {
    /// Seed for every random draw in the run.
    pub seed: u64,
    /// Number of equal-population frequency bins.
    pub frequency_bins: usize,
    /// Shared items drawn from each frequency bin.
    pub shared_per_bin: usize,
    /// Shared items drawn from the items without a frequency.
    pub shared_missing: usize,
    /// Number of equal-width AoA bins for the repeated items.
    pub aoa_bins: usize,
    /// Repeated items drawn on top of the one-per-AoA-bin items.
    pub repeated_random: usize,
    /// Hand-picked familiarization words.
    pub familiarization_words: Vec<String>,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            seed: 43,
            frequency_bins: 10,
            shared_per_bin: 3,
            shared_missing: 1,
            aoa_bins: 5,
            repeated_random: 20,
            familiarization_words: [
                "becher", "reis", "zeugnis", "komma", "kloster", "solo", "seuche", "reaktor",
                "hypothek", "dozent",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl ListsConfig {
    /// Load a config from a JSON file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Number of repeated items selected per list.
    pub fn repeated_total(&self) -> usize {
        self.aoa_bins + self.repeated_random
    }
}
