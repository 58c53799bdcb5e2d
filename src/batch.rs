//! Directory batch processor
//!
//! Walks every workbook in the spreadsheet directory and rewrites the batch
//! ledger with all records found, one ledger line each, sorted.

use crate::config::Config;
use crate::error::{BcvError, BcvResult};
use crate::excel::{stage_directory, StagingReport, WorkbookWalker};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct BatchReport {
    pub staging: Option<StagingReport>,
    /// Workbooks read successfully
    pub files: usize,
    pub sheets: usize,
    /// Ledger lines written, sorted
    pub lines: Vec<String>,
    /// Workbooks that could not be read, with the reason
    pub skipped_files: Vec<(PathBuf, String)>,
    /// Sheets with malformed cells, as `(file, sheet, reason)`
    pub rejected_sheets: Vec<(PathBuf, String, String)>,
}

pub struct BatchProcessor {
    dir: PathBuf,
    output: PathBuf,
    rename_files: bool,
    strict: bool,
}

impl BatchProcessor {
    pub fn new(config: &Config) -> Self {
        Self {
            dir: config.xls_dir.clone(),
            output: config.batch_output_path(),
            rename_files: config.rename_files,
            strict: config.strict_batch,
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn run(&self) -> BcvResult<BatchReport> {
        let mut report = BatchReport::default();
        if self.rename_files {
            report.staging = Some(stage_directory(&self.dir)?);
        }

        let mut lines = Vec::new();
        for path in list_workbooks(&self.dir)? {
            debug!(file = %path.display(), "reading workbook");
            let walked = match WorkbookWalker::new(&path).walk() {
                Ok(walked) => walked,
                Err(e) if !self.strict => {
                    warn!(file = %path.display(), error = %e, "skipping unreadable workbook");
                    report.skipped_files.push((path, e.to_string()));
                    continue;
                }
                Err(e) => {
                    return Err(BcvError::Workbook(format!("{}: {}", path.display(), e)));
                }
            };

            report.files += 1;
            report.sheets += walked.sheets;
            lines.extend(walked.records.iter().map(|r| r.to_ledger_line()));
            report.rejected_sheets.extend(
                walked
                    .rejected
                    .into_iter()
                    .map(|(sheet, reason)| (path.clone(), sheet, reason)),
            );
        }

        lines.sort();
        write_ledger(&self.output, &lines)?;
        info!(
            output = %self.output.display(),
            records = lines.len(),
            "batch ledger written"
        );

        report.lines = lines;
        Ok(report)
    }
}

/// Regular files in `dir`, in reverse name order.
pub fn list_workbooks(dir: &Path) -> BcvResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
    Ok(files)
}

/// Replace `path` with one newline-terminated line per entry.
pub fn write_ledger(path: &Path, lines: &[String]) -> BcvResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut content = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}
