//! Live history: append-only ledger files and the reconciler guarding them

pub mod ledger;
pub mod reconciler;

pub use ledger::{append_line, epoch_floor, high_water_mark, last_line};
pub use reconciler::{
    log_line, Clock, Outcome, QuotationSource, Reconciler, SkipReason, SystemClock,
};
