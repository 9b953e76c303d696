use std::cmp::Ordering;

/// How a single text cell takes part in a comparison.
///
/// Every cell is stored as text; whether it behaves as a number is decided
/// each time it is compared or aggregated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    /// The whole cell parses as a 64-bit float.
    Number(f64),
    /// Anything else, kept as the raw text.
    Text(&'a str),
}

impl<'a> CellValue<'a> {
    /// Classifies a cell. Partial numbers such as `"3.5x"` stay [CellValue::Text].
    pub fn parse(raw: &'a str) -> Self {
        match raw.parse::<f64>() {
            Ok(number) => Self::Number(number),
            Err(_) => Self::Text(raw),
        }
    }

    /// Returns the number if this is a [CellValue::Number].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Returns `true` if the cell was recognised as a number.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

/// Compares two raw cells.
///
/// Two numeric cells compare by value. Any other pair, including a number
/// against text, compares the raw strings lexicographically (case-sensitive).
pub fn compare_cells(left: &str, right: &str) -> Ordering {
    match (CellValue::parse(left), CellValue::parse(right)) {
        (CellValue::Number(l), CellValue::Number(r)) => l.total_cmp(&r),
        _ => left.cmp(right),
    }
}
