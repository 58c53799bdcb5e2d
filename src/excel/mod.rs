//! Spreadsheet side of the pipeline
//!
//! - `cells`: tagged-text view over a worksheet grid
//! - `extractor`: valuation date and EUR/USD rows of one sheet
//! - `workbook`: every sheet of one workbook
//! - `staging`: renaming upstream files before a batch run

pub mod cells;
pub mod extractor;
pub mod staging;
pub mod workbook;

pub use cells::{CellGrid, CellSegments};
pub use extractor::extract_record;
pub use staging::{stage_directory, StagingConvention, StagingReport};
pub use workbook::{walk_sheets, WorkbookReport, WorkbookWalker};
