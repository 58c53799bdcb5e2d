//! History reconciler
//!
//! Decides, once per run, whether the live quotation is new:
//!
//! ```text
//! Idle ──(today > last date)──> Fetching ──(quotation)──> Comparing ──(date > last date)──> Appending
//!   │                              │                          │
//!   └──────────────────────────────┴──────────────────────────┴──────────────> Skipped
//! ```
//!
//! Appending writes the log line first, then the ledger line, then (if
//! enabled) a desktop notification. Re-running on the same calendar day
//! after an append never touches the files again.

use crate::config::Config;
use crate::error::BcvResult;
use crate::history::ledger::{append_line, high_water_mark};
use crate::notify::Notifier;
use crate::types::{QuotationRecord, Rate};
use crate::web::{WebFetcher, WebQuotation};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const NOTIFICATION_TITLE: &str = "BCV Dolar";

/// Where live quotations come from
pub trait QuotationSource {
    fn fetch_quotation(&self) -> BcvResult<WebQuotation>;
}

impl QuotationSource for WebFetcher {
    fn fetch_quotation(&self) -> BcvResult<WebQuotation> {
        self.fetch()
    }
}

pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Today's quotation (or a later one) is already recorded
    UpToDate { last_date: NaiveDate },
    /// The source could not be reached
    Unavailable(String),
    /// The source still shows a quotation that is already recorded
    NotPublished {
        fetched: NaiveDate,
        last_date: NaiveDate,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Appended {
        record: QuotationRecord,
        log_line: String,
    },
    Skipped(SkipReason),
}

pub struct Reconciler<S, C = SystemClock> {
    history: PathBuf,
    log: PathBuf,
    source: S,
    clock: C,
    notifier: Option<Box<dyn Notifier>>,
}

impl<S: QuotationSource> Reconciler<S, SystemClock> {
    pub fn new(config: &Config, source: S) -> Self {
        Self::with_clock(config, source, SystemClock)
    }
}

impl<S: QuotationSource, C: Clock> Reconciler<S, C> {
    pub fn with_clock(config: &Config, source: S, clock: C) -> Self {
        Self {
            history: config.history_path(),
            log: config.log_path(),
            source,
            clock,
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Run one reconciliation. `tag` is appended to the log line.
    pub fn run(&self, tag: Option<&str>) -> BcvResult<Outcome> {
        let last_date = high_water_mark(&self.history)?;
        let now = self.clock.now();

        if now.date() <= last_date {
            debug!(%last_date, "quotation for today already recorded");
            return Ok(Outcome::Skipped(SkipReason::UpToDate { last_date }));
        }

        let quotation = match self.source.fetch_quotation() {
            Ok(q) => q,
            Err(e) if e.is_transport() => {
                warn!(error = %e, "quotation source unavailable");
                return Ok(Outcome::Skipped(SkipReason::Unavailable(e.to_string())));
            }
            Err(e) => return Err(e),
        };

        if quotation.date <= last_date {
            debug!(fetched = %quotation.date, %last_date, "no newer quotation published");
            return Ok(Outcome::Skipped(SkipReason::NotPublished {
                fetched: quotation.date,
                last_date,
            }));
        }

        let record = QuotationRecord::new(
            quotation.date,
            Rate::from_decimal_text(&quotation.eur)?,
            Rate::from_decimal_text(&quotation.usd)?,
        );

        let log_line = log_line(now, tag);
        append_line(&self.log, &log_line)?;
        append_line(&self.history, &record.to_ledger_line())?;
        info!(date = %record.date(), usd = %record.usd(), "appended quotation to history");

        if let Some(notifier) = &self.notifier {
            let subtitle = record.date().format("%Y-%m-%d").to_string();
            let message = format!("USD {}", record.usd());
            if let Err(e) = notifier.notify(NOTIFICATION_TITLE, &subtitle, &message) {
                warn!(error = %e, "desktop notification failed");
            }
        }

        Ok(Outcome::Appended { record, log_line })
    }
}

/// `<timestamp>` or `<timestamp> <tag>`
pub fn log_line(now: NaiveDateTime, tag: Option<&str>) -> String {
    let timestamp = now.format(LOG_TIMESTAMP_FORMAT).to_string();
    match tag.map(str::trim).filter(|t| !t.is_empty()) {
        Some(tag) => format!("{} {}", timestamp, tag),
        None => timestamp,
    }
}
