//! Staging pass for upstream spreadsheet names
//!
//! The central bank publishes one workbook per quarter under names like
//! `2_1_2c24_smc.xls`. The third underscore-delimited segment encodes the
//! quarter letter and the year (`2c24`); staging renames the file to
//! `<year><quarter>.xls` (`24c.xls`) so reverse name order is newest first.

use crate::error::{BcvError, BcvResult};
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const STAGED_EXTENSION: &str = "xls";

/// Upstream convention: `<a>_<b>_<x><quarter><yy>...`
const UPSTREAM_NAME_PATTERN: &str = r"^[^_]*_[^_]*_[^_](?P<quarter>[A-Za-z])(?P<year>\d{2})";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StagingReport {
    /// `(old name, new name)` in processing order
    pub renamed: Vec<(String, String)>,
    /// Names with an underscore that do not follow the upstream convention
    pub skipped: Vec<String>,
}

pub struct StagingConvention {
    pattern: Regex,
}

impl StagingConvention {
    pub fn new() -> BcvResult<Self> {
        let pattern = Regex::new(UPSTREAM_NAME_PATTERN)
            .map_err(|e| BcvError::Staging(format!("invalid name pattern: {}", e)))?;
        Ok(Self { pattern })
    }

    /// Staged name for an upstream file name, or `None` if it does not match.
    pub fn staged_name(&self, file_name: &str) -> Option<String> {
        let caps = self.pattern.captures(file_name)?;
        Some(format!(
            "{}{}.{}",
            &caps["year"], &caps["quarter"], STAGED_EXTENSION
        ))
    }
}

/// Rename every upstream-named file in `dir`, newest name first.
///
/// Names without an underscore are left alone. A target that already exists
/// is overwritten; there is no rollback.
pub fn stage_directory(dir: &Path) -> BcvResult<StagingReport> {
    let convention = StagingConvention::new()?;
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort_by(|a, b| b.cmp(a));

    let mut report = StagingReport::default();
    for old_name in names.into_iter().filter(|n| n.contains('_')) {
        let Some(new_name) = convention.staged_name(&old_name) else {
            warn!(file = %old_name, "name does not follow the upstream convention, not renamed");
            report.skipped.push(old_name);
            continue;
        };
        fs::rename(dir.join(&old_name), dir.join(&new_name))?;
        info!("Renamed '{}' to '{}'", old_name, new_name);
        report.renamed.push((old_name, new_name));
    }
    Ok(report)
}
