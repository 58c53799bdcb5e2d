//! Append-only flat files: the history ledger and the run log

use crate::error::BcvResult;
use crate::types::ledger_date;
use chrono::NaiveDate;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// High-water mark used when the history is empty
pub fn epoch_floor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn ensure_parent(path: &Path) -> BcvResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Last non-empty line of the file, trimmed.
///
/// A missing file is created empty and yields `None`.
pub fn last_line(path: &Path) -> BcvResult<Option<String>> {
    if !path.exists() {
        ensure_parent(path)?;
        fs::File::create(path)?;
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .map(str::to_string))
}

/// Date of the last recorded entry, or [`epoch_floor`] for an empty history.
pub fn high_water_mark(path: &Path) -> BcvResult<NaiveDate> {
    match last_line(path)? {
        Some(line) => ledger_date(&line),
        None => Ok(epoch_floor()),
    }
}

/// Append one newline-terminated line, creating the file if needed.
pub fn append_line(path: &Path, line: &str) -> BcvResult<()> {
    ensure_parent(path)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}
