//! bcv-rates - official USD/EUR quotations from the Central Bank of Venezuela
//!
//! Two independent paths produce the same ledger line format,
//! `<ISO date> EUR <rate> USD <rate>` with 8 fractional digits:
//!
//! - **Batch**: every sheet of every quarterly spreadsheet in a directory,
//!   sorted and written to a flat file (full rewrite).
//! - **Live**: the quotation on the bank's home page, appended to a history
//!   file only when it is newer than the last recorded entry.
//!
//! # Example
//!
//! ```no_run
//! use bcv_rates::config::Config;
//! use bcv_rates::history::{Outcome, Reconciler};
//! use bcv_rates::web::WebFetcher;
//!
//! let config = Config::default();
//! let fetcher = WebFetcher::new(&config)?;
//! match Reconciler::new(&config, fetcher).run(None)? {
//!     Outcome::Appended { record, .. } => println!("{}", record),
//!     Outcome::Skipped(reason) => println!("skipped: {:?}", reason),
//! }
//! # Ok::<(), bcv_rates::error::BcvError>(())
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod excel;
pub mod history;
pub mod notify;
pub mod types;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::{BcvError, BcvResult};
pub use types::{Currency, QuotationRecord, Rate};
