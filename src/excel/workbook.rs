//! Workbook walker - every sheet of one workbook through the extractor

use crate::error::BcvResult;
use crate::excel::extractor::extract_record;
use crate::types::QuotationRecord;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Outcome of walking one workbook
#[derive(Debug, Default)]
pub struct WorkbookReport {
    /// Records in sheet order
    pub records: Vec<QuotationRecord>,
    pub sheets: usize,
    /// Sheets whose cells did not fit the expected layout, with the reason
    pub rejected: Vec<(String, String)>,
}

pub struct WorkbookWalker {
    path: PathBuf,
}

impl WorkbookWalker {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Open the workbook and extract a record from each sheet.
    ///
    /// Failing to open the workbook or read a sheet is an error; a sheet
    /// whose cell text is malformed is rejected and reported instead.
    pub fn walk(&self) -> BcvResult<WorkbookReport> {
        let mut workbook = open_workbook_auto(&self.path)?;
        let sheet_names = workbook.sheet_names().to_vec();

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for name in sheet_names {
            let range = workbook.worksheet_range(&name)?;
            sheets.push((name, range));
        }
        Ok(walk_sheets(sheets))
    }
}

/// Run the extractor over sheets already loaded, in the given order.
pub fn walk_sheets<I>(sheets: I) -> WorkbookReport
where
    I: IntoIterator<Item = (String, Range<Data>)>,
{
    let mut report = WorkbookReport::default();
    for (name, range) in sheets {
        report.sheets += 1;
        match extract_record(&range) {
            Ok(Some(record)) => {
                debug!(sheet = %name, date = %record.date(), "extracted quotation");
                report.records.push(record);
            }
            Ok(None) => debug!(sheet = %name, "no quotation on sheet"),
            Err(e) => {
                warn!(sheet = %name, error = %e, "skipping malformed sheet");
                report.rejected.push((name, e.to_string()));
            }
        }
    }
    report
}
