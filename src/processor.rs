//! Stateless algorithms over borrowed row data: numeric detection, sorting and
//! column aggregation.

use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use crate::table::Row;
use crate::value::{CellValue, compare_cells};

/// Sort order requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Numeric statistics of a column, present only when at least one cell parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub sum: f64,
    pub average: f64,
    pub max: f64,
    pub min: f64,
}

/// Result of [aggregate_column].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnReport {
    /// Name of the analysed column.
    pub column: String,
    /// Rows wide enough to have a cell at the analysed index.
    pub row_count: usize,
    /// `None` when the column holds no numeric data.
    pub numeric: Option<NumericSummary>,
}

/// Returns the value of `text` if the whole string is a number.
pub fn is_numeric_cell(text: &str) -> Option<f64> {
    CellValue::parse(text).as_number()
}

/// Sorts `rows` in place on the cell at `column`.
///
/// Numeric pairs compare by value, every other pair by raw text. Rows must all
/// be wide enough for `column`.
pub fn sort_rows(rows: &mut [Row], column: usize, direction: SortDirection) {
    let compare = |a: &Row, b: &Row| {
        let ord = compare_cells(&a[column], &b[column]);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    };

    // Mixed numeric/text columns make the comparator intransitive, which
    // `slice::sort_by` is allowed to panic on.
    let taken: Vec<Row> = rows.iter_mut().map(std::mem::take).collect();
    let sorted = merge_sort(taken, &compare);
    for (slot, row) in rows.iter_mut().zip(sorted) {
        *slot = row;
    }
    debug!(column, ?direction, rows = rows.len(), "sorted rows");
}

/// Stable top-down merge sort that tolerates any comparator.
fn merge_sort<T, F>(mut items: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, compare);
    let right = merge_sort(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        // take from the right only when strictly smaller to stay stable
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            _ => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    merged
}

/// Computes count, sum, average, max and min of the numeric cells at `column`.
///
/// Rows too short to have the column are skipped and do not count.
/// Non-numeric cells count as rows but do not contribute to the statistics.
pub fn aggregate_column(rows: &[Row], column: usize, column_name: &str) -> ColumnReport {
    let mut row_count = 0;
    let mut count = 0;
    let mut sum = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;

    for cell in rows.iter().filter_map(|row| row.get(column)) {
        row_count += 1;
        if let Some(value) = is_numeric_cell(cell) {
            count += 1;
            sum += value;
            max = max.max(value);
            min = min.min(value);
        }
    }

    let numeric = (count > 0).then(|| NumericSummary {
        count,
        sum,
        average: sum / count as f64,
        max,
        min,
    });

    ColumnReport {
        column: column_name.to_string(),
        row_count,
        numeric,
    }
}

impl fmt::Display for ColumnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- column [{}] ---", self.column)?;
        writeln!(f, "rows:          {}", self.row_count)?;
        match &self.numeric {
            Some(stats) => {
                writeln!(f, "numeric cells: {}", stats.count)?;
                writeln!(f, "sum:           {}", stats.sum)?;
                writeln!(f, "avg:           {}", stats.average)?;
                writeln!(f, "max:           {}", stats.max)?;
                writeln!(f, "min:           {}", stats.min)?;
            }
            None => writeln!(f, "no numeric data: sum/avg/max/min unavailable")?,
        }
        write!(f, "{}", "-".repeat(35))
    }
}
