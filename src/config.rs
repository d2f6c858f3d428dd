//! User settings for spendbook
//!
//! Settings live in an optional JSON file. Every field has a default, so a
//! missing file or a partial one is fine; a file that is not valid JSON is an
//! error.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Categories offered by the interactive menu. The ledger accepts any text.
pub const DEFAULT_CATEGORIES: [&str; 5] = [
    "Food",
    "Transport",
    "Entertainment",
    "Utilities",
    "Shopping",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Symbol printed in front of amounts
    pub currency_symbol: String,

    /// Number of intervals in the amount histogram
    pub histogram_bins: usize,

    /// Width in characters of the longest chart bar
    pub chart_width: usize,

    /// Categories suggested by the interactive menu
    pub categories: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".to_string(),
            histogram_bins: 10,
            chart_width: 40,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read settings {}", path.display()));
            }
        };

        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;
        Ok(settings.normalized())
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn normalized(mut self) -> Self {
        self.histogram_bins = self.histogram_bins.max(1);
        self.chart_width = self.chart_width.max(1);
        if self.categories.is_empty() {
            self.categories = Self::default().categories;
        }
        self
    }
}
