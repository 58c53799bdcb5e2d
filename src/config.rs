//! Runtime configuration
//!
//! Every component receives its settings from a [`Config`] value at
//! construction. A YAML file may override any subset of the defaults:
//!
//! ```yaml
//! xls_dir: ./xls_files/
//! output_dir: ./output/
//! source_url: https://www.bcv.org.ve/
//! notifications: false
//! insecure_transport: true
//! ```

use crate::error::BcvResult;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SOURCE_URL: &str = "https://www.bcv.org.ve/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the quarterly spreadsheet files
    pub xls_dir: PathBuf,
    /// Base directory for the output, log and history files
    pub output_dir: PathBuf,
    /// Batch ledger; defaults to `<output_dir>/excel.txt`
    pub batch_output: Option<PathBuf>,
    /// Run log; defaults to `<output_dir>/log.txt`
    pub log_file: Option<PathBuf>,
    /// Live history ledger; defaults to `<output_dir>/history.txt`
    pub history_file: Option<PathBuf>,
    pub source_url: String,
    pub notifications: bool,
    /// Rename upstream spreadsheet names before the batch run
    pub rename_files: bool,
    /// Skip TLS certificate validation for the source site
    pub insecure_transport: bool,
    /// Fetch timeout in seconds; must be at least 1
    #[serde(deserialize_with = "positive_secs")]
    pub timeout_secs: u64,
    /// Abort the batch on the first unreadable workbook instead of skipping it
    pub strict_batch: bool,
}

fn positive_secs<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = u64::deserialize(deserializer)?;
    if secs == 0 {
        return Err(serde::de::Error::custom("timeout_secs must be at least 1"));
    }
    Ok(secs)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            xls_dir: PathBuf::from("./xls_files/"),
            output_dir: PathBuf::from("./output/"),
            batch_output: None,
            log_file: None,
            history_file: None,
            source_url: DEFAULT_SOURCE_URL.to_string(),
            notifications: true,
            rename_files: true,
            insecure_transport: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            strict_batch: false,
        }
    }
}

impl Config {
    /// Load a YAML config file; absent keys keep their defaults.
    pub fn from_file(path: &Path) -> BcvResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> BcvResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> BcvResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn batch_output_path(&self) -> PathBuf {
        self.batch_output
            .clone()
            .unwrap_or_else(|| self.output_dir.join("excel.txt"))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.output_dir.join("log.txt"))
    }

    pub fn history_path(&self) -> PathBuf {
        self.history_file
            .clone()
            .unwrap_or_else(|| self.output_dir.join("history.txt"))
    }
}
