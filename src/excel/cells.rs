//! Cell grid abstraction over a parsed worksheet
//!
//! The extractor reads every cell as *tagged text*: `<kind>:<payload>`,
//! where text payloads are wrapped in single quotes
//! (`text:'Fecha Valor: 05/01/2024'`, `number:36.1234`, `empty:''`).
//! Stripping the quotes and splitting on `:` yields the segments the
//! extractor matches on: segment 0 is the kind, segment 1 the label or
//! value, segment 2 (if any) the value following a label.

use crate::error::{BcvError, BcvResult};
use calamine::{Data, Range};

/// Read-only access to one sheet's cells, addressed from the sheet origin.
pub trait CellGrid {
    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize;

    /// Tagged text of the cell; cells outside the grid render as `empty:''`.
    fn cell_text(&self, row: usize, col: usize) -> String;
}

impl CellGrid for Range<Data> {
    fn row_count(&self) -> usize {
        self.end().map_or(0, |(row, _)| row as usize + 1)
    }

    fn column_count(&self) -> usize {
        self.end().map_or(0, |(_, col)| col as usize + 1)
    }

    fn cell_text(&self, row: usize, col: usize) -> String {
        let (Ok(row), Ok(col)) = (u32::try_from(row), u32::try_from(col)) else {
            return render_cell(None);
        };
        render_cell(self.get_value((row, col)))
    }
}

/// Render a calamine cell value as tagged text
pub fn render_cell(cell: Option<&Data>) -> String {
    match cell {
        None | Some(Data::Empty) => "empty:''".to_string(),
        Some(Data::String(s)) => format!("text:'{}'", s),
        Some(Data::Float(f)) => format!("number:{}", render_number(*f)),
        Some(Data::Int(i)) => format!("number:{}.0", i),
        Some(Data::Bool(b)) => format!("bool:{}", u8::from(*b)),
        Some(Data::DateTime(dt)) => format!("xldate:{}", render_number(dt.as_f64())),
        Some(Data::Error(e)) => format!("error:{}", e),
        Some(other) => format!("text:'{}'", other),
    }
}

/// Numbers always carry a decimal point so the rate grammar can split them.
fn render_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Quote-stripped cell text split on `:`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSegments {
    parts: Vec<String>,
}

impl CellSegments {
    pub fn parse(text: &str) -> Self {
        let unquoted = text.replace(['\'', '"'], "");
        Self {
            parts: unquoted.split(':').map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Trimmed segment `index`, if the text had that many separators.
    pub fn field(&self, index: usize) -> Option<&str> {
        self.parts.get(index).map(|s| s.trim())
    }

    /// Like [`field`](Self::field), but a missing segment is a format error.
    pub fn required(&self, index: usize, what: &str) -> BcvResult<&str> {
        self.field(index).ok_or_else(|| {
            BcvError::CellFormat(format!(
                "expected {} in segment {} of '{}'",
                what,
                index,
                self.parts.join(":")
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Range<Data> {
        let mut range = Range::new((0, 0), (2, 4));
        range.set_value((0, 3), Data::String("Fecha Valor: 05/01/2024".into()));
        range.set_value((1, 1), Data::String("EUR".into()));
        range.set_value((1, 4), Data::Float(39.5));
        range.set_value((2, 4), Data::Float(36.0));
        range
    }

    #[test]
    fn test_range_dimensions() {
        let range = grid();
        assert_eq!(range.row_count(), 3);
        assert_eq!(range.column_count(), 5);
        assert_eq!(Range::<Data>::empty().row_count(), 0);
    }

    #[test]
    fn test_range_cell_text() {
        let range = grid();
        assert_eq!(range.cell_text(0, 3), "text:'Fecha Valor: 05/01/2024'");
        assert_eq!(range.cell_text(1, 1), "text:'EUR'");
        assert_eq!(range.cell_text(1, 4), "number:39.5");
        assert_eq!(range.cell_text(2, 4), "number:36.0");
        assert_eq!(range.cell_text(0, 0), "empty:''");
        assert_eq!(range.cell_text(40, 40), "empty:''");
    }

    #[test]
    fn test_render_other_kinds() {
        assert_eq!(render_cell(Some(&Data::Int(7))), "number:7.0");
        assert_eq!(render_cell(Some(&Data::Bool(true))), "bool:1");
    }

    #[test]
    fn test_segments() {
        let segs = CellSegments::parse("text:'Fecha Valor: 05/01/2024'");
        assert_eq!(segs.len(), 3);
        assert_eq!(segs.field(0), Some("text"));
        assert_eq!(segs.field(1), Some("Fecha Valor"));
        assert_eq!(segs.field(2), Some("05/01/2024"));
        assert_eq!(segs.field(3), None);
    }

    #[test]
    fn test_required_segment_missing() {
        let segs = CellSegments::parse("36.1234");
        let err = segs.required(1, "a value").unwrap_err();
        assert!(matches!(err, BcvError::CellFormat(_)));
    }
}
