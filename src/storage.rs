//! Pipe-delimited flat-file format.
//!
//! ```text
//! id|name|age
//! 1|alice|30
//! 2|bob|25
//! ```
//!
//! The first line holds the column names, every following line one row.
//! Lines end with `\n`; a trailing `\r` is tolerated on load.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::table::{Row, Schema, Table};

/// Field separator. Reserved: never allowed inside a cell or column name.
pub const DELIMITER: char = '|';

/// File used when no other path is configured.
pub const DEFAULT_FILE_NAME: &str = "database.txt";

/// Writes `table` in the flat-file format.
///
/// # Errors
/// Returns [StoreError::NoSchema] for a table without columns, before
/// anything is written.
pub fn serialize<W: Write>(table: &Table, writer: &mut W) -> Result<()> {
    ensure_schema(table)?;
    write_lines(table, writer)?;
    Ok(())
}

fn ensure_schema(table: &Table) -> Result<()> {
    if table.schema.is_empty() {
        return Err(StoreError::NoSchema);
    }
    Ok(())
}

fn write_lines<W: Write>(table: &Table, writer: &mut W) -> io::Result<()> {
    write_line(writer, table.schema.columns())?;
    for row in &table.rows {
        write_line(writer, row)?;
    }
    writer.flush()
}

fn write_line<W: Write>(writer: &mut W, cells: &[String]) -> io::Result<()> {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            write!(writer, "{DELIMITER}")?;
        }
        writer.write_all(cell.as_bytes())?;
    }
    writeln!(writer)
}

/// Parses the flat-file format.
///
/// Returns `Ok(None)` when the input has no header line. Rows whose field
/// count differs from the header are dropped.
pub fn deserialize<R: BufRead>(reader: R) -> io::Result<Option<Table>> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => return Ok(None),
    };
    let header = strip_cr(&header);
    if header.is_empty() {
        return Ok(None);
    }
    let schema = Schema {
        columns: split_line(header),
    };

    let mut rows: Vec<Row> = Vec::new();
    for line in lines {
        let line = line?;
        let line = strip_cr(&line);
        if line.is_empty() {
            continue;
        }
        rows.push(split_line(line));
    }

    let (table, dropped) = Table::from_parts(schema, rows);
    if dropped > 0 {
        debug!(dropped, "dropped rows with a wrong field count");
    }
    Ok(Some(table))
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

fn split_line(line: &str) -> Vec<String> {
    line.split(DELIMITER).map(str::to_string).collect()
}

/// Writes `table` to `path`, replacing any existing file.
///
/// A failure halfway through leaves a partially written file behind.
pub fn save(table: &Table, path: &Path) -> Result<()> {
    let write_failed = |source| StoreError::FileWriteFailed {
        path: path.to_path_buf(),
        source,
    };
    ensure_schema(table)?;
    let file = File::create(path).map_err(write_failed)?;
    let mut writer = BufWriter::new(file);
    write_lines(table, &mut writer).map_err(write_failed)?;

    info!(
        path = %path.display(),
        columns = table.schema.len(),
        rows = table.row_count(),
        "saved table"
    );
    Ok(())
}

/// Reads a table from `path`.
///
/// # Errors
/// [StoreError::FileNotFound] if the path does not exist,
/// [StoreError::FileUnreadable] for any other open or read failure.
pub fn load(path: &Path) -> Result<Option<Table>> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => StoreError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => StoreError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let table = deserialize(BufReader::new(file)).map_err(|source| {
        StoreError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        }
    })?;

    match &table {
        Some(t) => info!(
            path = %path.display(),
            columns = t.schema.len(),
            rows = t.row_count(),
            "loaded table"
        ),
        None => info!(path = %path.display(), "loaded empty file"),
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let schema = Schema::new(vec!["id".into(), "name".into(), "age".into()]).unwrap();
        let mut table = Table::new(schema);
        table
            .insert(vec!["1".into(), "alice".into(), "30".into()])
            .unwrap();
        table
            .insert(vec!["2".into(), "bob".into(), "".into()])
            .unwrap();
        table
    }

    fn to_text(table: &Table) -> String {
        let mut out = Vec::new();
        serialize(table, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_serialize_format() {
        assert_eq!(to_text(&sample()), "id|name|age\n1|alice|30\n2|bob|\n");
    }

    #[test]
    fn test_serialize_without_schema() {
        let table = Table::new(Schema { columns: vec![] });
        let mut out = Vec::new();
        assert!(matches!(
            serialize(&table, &mut out),
            Err(StoreError::NoSchema)
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let table = sample();
        let text = to_text(&table);
        let loaded = deserialize(text.as_bytes()).unwrap().unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_deserialize_drops_malformed_rows() {
        let text = "id|name\n1|alice\n2\n3|carol|extra\n4|dave\n";
        let table = deserialize(text.as_bytes()).unwrap().unwrap();
        assert_eq!(table.schema.columns(), vec!["id", "name"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1], vec!["4", "dave"]);
    }

    #[test]
    fn test_deserialize_crlf_and_blank_lines() {
        let text = "id|name\r\n1|alice\r\n\r\n\n2|bob\r";
        let table = deserialize(text.as_bytes()).unwrap().unwrap();
        assert_eq!(table.schema.columns(), vec!["id", "name"]);
        assert_eq!(table.rows, vec![vec!["1", "alice"], vec!["2", "bob"]]);
    }

    #[test]
    fn test_values_that_cannot_round_trip_are_rejected() {
        // a lone empty key would be written as a blank line and skipped on load
        let mut single = Table::new(Schema::new(vec!["id".into()]).unwrap());
        assert!(single.insert(vec!["".into()]).is_err());
        single.insert(vec!["a".into()]).unwrap();
        let loaded = deserialize(to_text(&single).as_bytes()).unwrap().unwrap();
        assert_eq!(loaded, single);

        // an empty column name would be written as an empty header
        assert!(matches!(
            Schema::new(vec!["".into()]),
            Err(StoreError::EmptyValue { .. })
        ));
    }

    #[test]
    fn test_deserialize_empty_input() {
        assert!(deserialize("".as_bytes()).unwrap().is_none());
        assert!(deserialize("\r\n1|a\n".as_bytes()).unwrap().is_none());
    }
}
