//! Tabular record extractor - one sheet in, at most one quotation out

use crate::error::{BcvError, BcvResult};
use crate::excel::cells::{CellGrid, CellSegments};
use crate::types::{Currency, QuotationRecord, Rate};
use chrono::NaiveDate;
use tracing::debug;

/// Column scanned for the valuation date label
pub const DATE_COLUMN: usize = 3;
/// Column holding the currency code of each rate row
pub const CURRENCY_COLUMN: usize = 1;
pub const DATE_LABEL: &str = "Fecha Valor";
pub const SHEET_DATE_FORMAT: &str = "%d/%m/%Y";

/// Extract the sheet's quotation.
///
/// Returns `Ok(None)` when the sheet has no valuation date or lacks either
/// the EUR or the USD row. Malformed date or rate text is an error.
/// The first occurrence of the date label and of each currency wins.
pub fn extract_record<G: CellGrid + ?Sized>(grid: &G) -> BcvResult<Option<QuotationRecord>> {
    let Some(date) = find_valuation_date(grid)? else {
        debug!("no '{}' label in column {}", DATE_LABEL, DATE_COLUMN);
        return Ok(None);
    };

    let rates = find_rates(grid)?;
    match (rates.eur, rates.usd) {
        (Some(eur), Some(usd)) => Ok(Some(QuotationRecord::new(date, eur, usd))),
        (eur, usd) => {
            debug!(
                %date,
                has_eur = eur.is_some(),
                has_usd = usd.is_some(),
                "sheet is missing a currency row"
            );
            Ok(None)
        }
    }
}

/// Scan [`DATE_COLUMN`] top to bottom for `Fecha Valor: dd/mm/yyyy`.
pub fn find_valuation_date<G: CellGrid + ?Sized>(grid: &G) -> BcvResult<Option<NaiveDate>> {
    if grid.column_count() <= DATE_COLUMN {
        return Ok(None);
    }

    for row in 0..grid.row_count() {
        let segments = CellSegments::parse(&grid.cell_text(row, DATE_COLUMN));
        if segments.field(1) != Some(DATE_LABEL) {
            continue;
        }
        let value = segments.required(2, "a valuation date")?;
        return parse_sheet_date(value).map(Some);
    }
    Ok(None)
}

/// Parse `dd/mm/yyyy`, ignoring embedded spaces.
pub fn parse_sheet_date(value: &str) -> BcvResult<NaiveDate> {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    NaiveDate::parse_from_str(&compact, SHEET_DATE_FORMAT)
        .map_err(|e| BcvError::Date(format!("'{}': {}", value, e)))
}

#[derive(Debug, Default)]
struct SheetRates {
    eur: Option<Rate>,
    usd: Option<Rate>,
}

impl SheetRates {
    fn slot(&mut self, currency: Currency) -> &mut Option<Rate> {
        match currency {
            Currency::Eur => &mut self.eur,
            Currency::Usd => &mut self.usd,
        }
    }

    fn is_complete(&self) -> bool {
        self.eur.is_some() && self.usd.is_some()
    }
}

fn find_rates<G: CellGrid + ?Sized>(grid: &G) -> BcvResult<SheetRates> {
    let mut rates = SheetRates::default();
    let Some(last_column) = grid.column_count().checked_sub(1) else {
        return Ok(rates);
    };

    for row in 0..grid.row_count() {
        let segments = CellSegments::parse(&grid.cell_text(row, CURRENCY_COLUMN));
        let Some(currency) = segments.field(1).and_then(|code| code.parse::<Currency>().ok())
        else {
            continue;
        };

        let slot = rates.slot(currency);
        if slot.is_some() {
            continue;
        }
        *slot = Some(rate_from_cell(&grid.cell_text(row, last_column))?);

        if rates.is_complete() {
            break;
        }
    }
    Ok(rates)
}

/// Rate cells look like `number:36.1234`; the value is segment 1.
fn rate_from_cell(text: &str) -> BcvResult<Rate> {
    let segments = CellSegments::parse(text);
    let value = segments.required(1, "a rate value")?;
    if !value.contains('.') {
        return Err(BcvError::CellFormat(format!(
            "rate '{}' has no '.' separator",
            value
        )));
    }
    Rate::from_decimal_text(value)
}
