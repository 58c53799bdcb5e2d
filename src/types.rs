use crate::error::{BcvError, BcvResult};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// ISO date layout used by every ledger line
pub const LEDGER_DATE_FORMAT: &str = "%Y-%m-%d";

//==============================================================================
// Currencies
//==============================================================================

/// Currencies tracked by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Eur,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }
}

impl FromStr for Currency {
    type Err = BcvError;

    fn from_str(s: &str) -> BcvResult<Self> {
        match s {
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            other => Err(BcvError::CellFormat(format!(
                "unknown currency code '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

//==============================================================================
// Rates
//==============================================================================

/// An exchange rate kept in its published textual form.
///
/// Always renders as `<integer>,<fraction>` with exactly
/// [`Rate::FRACTION_DIGITS`] fractional digits. Shorter fractions are
/// right-padded with zeros; longer ones are truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rate {
    integer: String,
    fraction: String,
}

impl Rate {
    pub const FRACTION_DIGITS: usize = 8;

    /// Parse decimal text such as `36.1234` or `36,1234`.
    ///
    /// When only one of `.` and `,` appears, its first occurrence is the
    /// decimal separator. When both appear (`1.234,56`, `1,234.56`), the last
    /// one is the decimal separator and the other is grouping in the integer
    /// part. Both parts must be ASCII digits; the integer part may not be empty.
    pub fn from_decimal_text(text: &str) -> BcvResult<Self> {
        let trimmed = text.trim();
        let grouped = trimmed.contains('.') && trimmed.contains(',');
        let separator = if grouped {
            trimmed.rfind(|c| c == '.' || c == ',')
        } else {
            trimmed.find(|c| c == '.' || c == ',')
        };
        let at = separator.ok_or_else(|| {
            BcvError::CellFormat(format!("no decimal separator in '{}'", trimmed))
        })?;

        let group_mark = if trimmed[at..].starts_with(',') { '.' } else { ',' };
        let integer: String = if grouped {
            trimmed[..at].trim().chars().filter(|&c| c != group_mark).collect()
        } else {
            trimmed[..at].trim().to_string()
        };
        let integer = integer.as_str();
        let fraction = trimmed[at + 1..].trim();

        if integer.is_empty() || !integer.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BcvError::CellFormat(format!(
                "invalid integer part in rate '{}'",
                trimmed
            )));
        }
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BcvError::CellFormat(format!(
                "invalid fractional part in rate '{}'",
                trimmed
            )));
        }

        let mut fraction: String = fraction.chars().take(Self::FRACTION_DIGITS).collect();
        while fraction.len() < Self::FRACTION_DIGITS {
            fraction.push('0');
        }

        Ok(Self {
            integer: integer.to_string(),
            fraction,
        })
    }

    pub fn integer(&self) -> &str {
        &self.integer
    }

    pub fn fraction(&self) -> &str {
        &self.fraction
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.integer, self.fraction)
    }
}

//==============================================================================
// Quotation records
//==============================================================================

/// One day's official EUR and USD quotation.
///
/// Serializes (via `Display`) to a ledger line:
/// `<ISO date> EUR <eur rate> USD <usd rate>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotationRecord {
    date: NaiveDate,
    eur: Rate,
    usd: Rate,
}

impl QuotationRecord {
    pub fn new(date: NaiveDate, eur: Rate, usd: Rate) -> Self {
        Self { date, eur, usd }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn eur(&self) -> &Rate {
        &self.eur
    }

    pub fn usd(&self) -> &Rate {
        &self.usd
    }

    pub fn rate(&self, currency: Currency) -> &Rate {
        match currency {
            Currency::Eur => &self.eur,
            Currency::Usd => &self.usd,
        }
    }

    pub fn to_ledger_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QuotationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.date.format(LEDGER_DATE_FORMAT),
            Currency::Eur,
            self.eur,
            Currency::Usd,
            self.usd
        )
    }
}

/// Date of a ledger line, read from its first whitespace-separated token.
pub fn ledger_date(line: &str) -> BcvResult<NaiveDate> {
    let token = line
        .split_whitespace()
        .next()
        .ok_or_else(|| BcvError::Ledger("empty ledger line".to_string()))?;
    NaiveDate::parse_from_str(token, LEDGER_DATE_FORMAT)
        .map_err(|e| BcvError::Ledger(format!("bad date '{}' in ledger line: {}", token, e)))
}
