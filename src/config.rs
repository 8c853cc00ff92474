use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming an optional JSON settings file.
pub const CONFIG_ENV: &str = "RUSTY_REPORT_CONFIG";

/// Tunable knobs of the report pipeline.
///
/// Every field has a default, so a settings file only needs the keys it
/// wants to override:
///
/// ```json
/// { "numeric_match_ratio": 0.8, "pie_top_n": 5 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minimum number of parseable cells before a text column counts as numeric.
    pub numeric_min_matches: usize,
    /// Fraction of rows that must parse before a text column counts as numeric.
    pub numeric_match_ratio: f64,
    /// Rows kept for bar, column and line charts. Readability limit, not a technical one.
    pub chart_top_n: usize,
    /// Slices kept for pie charts.
    pub pie_top_n: usize,
    pub report_base_name: String,
    pub chart_base_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            numeric_min_matches: 3,
            numeric_match_ratio: 0.6,
            chart_top_n: 10,
            pie_top_n: 6,
            report_base_name: "report_output".to_string(),
            chart_base_name: "chart_output".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `$RUSTY_REPORT_CONFIG`, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::from_file(Path::new(&path)) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Path::new(&path).display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file: {e:#}");
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Number of parseable cells a text column needs to be offered as a value column.
    pub fn numeric_threshold(&self, row_count: usize) -> usize {
        let by_ratio = (self.numeric_match_ratio * row_count as f64).ceil() as usize;
        self.numeric_min_matches.max(by_ratio)
    }
}
