use crate::error::{Result, StoreError};
use crate::storage::DELIMITER;

/// One record: a text cell per column, cell 0 being the primary key.
pub type Row = Vec<String>;

/// Ordered column names. Column 0 is the primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub(crate) columns: Vec<String>,
}

impl Schema {
    /// Builds a schema from column names.
    ///
    /// # Errors
    /// Returns an error if there are no columns, if a name is empty, or if a
    /// name contains the delimiter or a line break.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        if columns.is_empty() {
            return Err(StoreError::EmptySchema);
        }
        for name in &columns {
            if name.is_empty() {
                return Err(StoreError::EmptyValue {
                    what: "column name",
                });
            }
            check_cell(name)?;
        }
        Ok(Self { columns })
    }

    /// Column names, primary key first.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Name of the primary-key column.
    pub fn primary_key(&self) -> Option<&str> {
        self.columns.first().map(String::as_str)
    }
}

/// Rejects values that would break the flat-file format.
pub(crate) fn check_cell(value: &str) -> Result<()> {
    if value.contains([DELIMITER, '\n', '\r']) {
        return Err(StoreError::IllegalCharacter {
            value: value.to_string(),
        });
    }
    Ok(())
}

/// A schema and its rows, kept in insertion (or last sort) order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub schema: Schema,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    /// Assembles a table from loaded parts, keeping only rows as wide as the
    /// schema. Returns the table and the number of dropped rows.
    pub(crate) fn from_parts(schema: Schema, rows: Vec<Row>) -> (Self, usize) {
        let total = rows.len();
        let rows: Vec<Row> = rows
            .into_iter()
            .filter(|row| row.len() == schema.len())
            .collect();
        let dropped = total - rows.len();
        (Self { schema, rows }, dropped)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Appends a row and returns its index.
    ///
    /// # Errors
    /// - the row width differs from the schema;
    /// - the primary key is empty;
    /// - a cell contains the delimiter or a line break;
    /// - the primary key is already used.
    ///
    /// The table is left unchanged on error.
    pub fn insert(&mut self, row: Row) -> Result<usize> {
        if row.len() != self.schema.len() {
            return Err(StoreError::ColumnCountMismatch {
                expected: self.schema.len(),
                found: row.len(),
            });
        }
        if row[0].is_empty() {
            return Err(StoreError::EmptyValue { what: "primary key" });
        }
        for cell in &row {
            check_cell(cell)?;
        }
        if self.find_row_index_by_primary_key(&row[0]).is_some() {
            return Err(StoreError::DuplicateKey {
                key: row[0].clone(),
            });
        }
        self.rows.push(row);
        Ok(self.rows.len() - 1)
    }

    /// Linear scan for the row whose primary key equals `key`.
    pub fn find_row_index_by_primary_key(&self, key: &str) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.first().is_some_and(|pk| pk == key))
    }

    pub fn get_row(&self, row_idx: usize) -> Option<&Row> {
        self.rows.get(row_idx)
    }

    /// Checks that `index` names a column of the schema.
    pub fn column_index(&self, index: usize) -> Result<usize> {
        if index >= self.schema.len() {
            return Err(StoreError::InvalidColumnIndex {
                index,
                columns: self.schema.len(),
            });
        }
        Ok(index)
    }
}
