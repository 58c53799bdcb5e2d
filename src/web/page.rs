//! Markup parsing for the central bank home page

use crate::error::{BcvError, BcvResult};
use crate::types::LEDGER_DATE_FORMAT;
use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};

pub const EUR_SELECTOR: &str = "div#euro strong";
pub const USD_SELECTOR: &str = "div#dolar strong";
pub const DATE_SELECTOR: &str = "span.date-display-single";
pub const DATE_ATTRIBUTE: &str = "content";

/// The quotation as published: rate text is kept verbatim (trimmed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebQuotation {
    pub date: NaiveDate,
    pub eur: String,
    pub usd: String,
}

/// Pull the EUR and USD rates and the valuation date out of the page.
///
/// Any missing element is a [`BcvError::Markup`] error.
pub fn parse_quotation_page(html: &str) -> BcvResult<WebQuotation> {
    let document = Html::parse_document(html);

    let eur = select_text(&document, EUR_SELECTOR)?;
    let usd = select_text(&document, USD_SELECTOR)?;

    let date_element = select_first(&document, DATE_SELECTOR)?;
    let timestamp = date_element.value().attr(DATE_ATTRIBUTE).ok_or_else(|| {
        BcvError::Markup(format!(
            "'{}' has no '{}' attribute",
            DATE_SELECTOR, DATE_ATTRIBUTE
        ))
    })?;

    Ok(WebQuotation {
        date: parse_timestamp_date(timestamp)?,
        eur,
        usd,
    })
}

/// Date part of an ISO-8601 timestamp (`2024-01-11T00:00:00-04:00`).
pub fn parse_timestamp_date(timestamp: &str) -> BcvResult<NaiveDate> {
    let date_part = timestamp.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, LEDGER_DATE_FORMAT)
        .map_err(|e| BcvError::Date(format!("'{}': {}", timestamp, e)))
}

fn select_first<'a>(document: &'a Html, selector: &str) -> BcvResult<ElementRef<'a>> {
    let parsed = Selector::parse(selector)
        .map_err(|e| BcvError::Markup(format!("bad selector '{}': {}", selector, e)))?;
    document
        .select(&parsed)
        .next()
        .ok_or_else(|| BcvError::Markup(format!("no element matches '{}'", selector)))
}

fn select_text(document: &Html, selector: &str) -> BcvResult<String> {
    let element = select_first(document, selector)?;
    Ok(element.text().collect::<String>().trim().to_string())
}
