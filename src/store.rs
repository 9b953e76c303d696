use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::processor::{self, ColumnReport, SortDirection};
use crate::search::{self, SearchResult};
use crate::storage;
use crate::table::{Row, Schema, Table};

/// The main entry point of the engine.
///
/// It owns at most one table and exposes one method per user command.
/// Arguments are expected to be already collected by the caller; the store
/// never prompts.
#[derive(Debug, Default)]
pub struct TableStore {
    /// `None` until a schema is created or a file is loaded.
    table: Option<Table>,
    config: StoreConfig,
}

/// Read-only view of the whole table, returned by [TableStore::display_all].
#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    /// Column names, primary key first.
    pub columns: &'a [String],
    /// Rows in table order.
    pub rows: &'a [Row],
}

impl TableView<'_> {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// What a load brought into memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub columns: usize,
    pub rows: usize,
}

impl TableStore {
    /// Creates an empty store persisting to the default file.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            table: None,
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Path used by [TableStore::save] and [TableStore::load].
    pub fn data_file(&self) -> &Path {
        &self.config.data_file
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.table.as_ref().map(|t| &t.schema)
    }

    /// Rows in table order; empty without a schema.
    pub fn rows(&self) -> &[Row] {
        self.table
            .as_ref()
            .map(|t| t.rows.as_slice())
            .unwrap_or_default()
    }

    pub fn row(&self, row_idx: usize) -> Option<&Row> {
        self.table.as_ref()?.get_row(row_idx)
    }

    pub fn row_count(&self) -> usize {
        self.rows().len()
    }

    /// `true` when replacing the schema would discard rows. Callers use it to
    /// ask for confirmation before [TableStore::create_schema].
    pub fn has_rows(&self) -> bool {
        self.row_count() > 0
    }

    /// Replaces the schema and drops every row. Column 0 is the primary key.
    ///
    /// # Errors
    /// Returns an error if `columns` is empty or a name contains the
    /// delimiter. The current table is kept in that case.
    ///
    /// # Example
    /// ```
    /// use flatdb::TableStore;
    ///
    /// let mut store = TableStore::new();
    /// store.create_schema(vec!["id".into(), "name".into()]).unwrap();
    /// store.insert_row(vec!["1".into(), "alice".into()]).unwrap();
    ///
    /// assert_eq!(store.find_row_index_by_primary_key("1"), Some(0));
    /// ```
    pub fn create_schema(&mut self, columns: Vec<String>) -> Result<()> {
        let schema = Schema::new(columns)?;
        if let Some(old) = &self.table {
            debug!(discarded_rows = old.row_count(), "replacing schema");
        }
        self.table = Some(Table::new(schema));
        Ok(())
    }

    /// Inserts a row and returns its index.
    ///
    /// # Errors
    /// [StoreError::NoSchema], [StoreError::ColumnCountMismatch],
    /// [StoreError::IllegalCharacter] or [StoreError::DuplicateKey]. Nothing is
    /// inserted on error.
    pub fn insert_row(&mut self, cells: Vec<String>) -> Result<usize> {
        self.table_mut()?.insert(cells)
    }

    pub fn find_row_index_by_primary_key(&self, key: &str) -> Option<usize> {
        self.table.as_ref()?.find_row_index_by_primary_key(key)
    }

    /// Headers, rows and row count of the current table.
    pub fn display_all(&self) -> Result<TableView<'_>> {
        let table = self.table()?;
        Ok(TableView {
            columns: &table.schema.columns,
            rows: &table.rows,
        })
    }

    /// Rows whose cell at `column` is close to `keyword`, closest first.
    ///
    /// # Errors
    /// [StoreError::NoSchema], [StoreError::EmptyTable] or
    /// [StoreError::InvalidColumnIndex].
    pub fn fuzzy_search(&self, column: usize, keyword: &str) -> Result<Vec<SearchResult>> {
        let table = self.non_empty_table()?;
        let column = table.column_index(column)?;
        let results = search::fuzzy_search(&table.rows, column, keyword);
        debug!(column, keyword, matches = results.len(), "fuzzy search");
        Ok(results)
    }

    /// Sorts the rows in place on `column`.
    pub fn sort_table(&mut self, column: usize, direction: SortDirection) -> Result<()> {
        let table = self.non_empty_table_mut()?;
        let column = table.column_index(column)?;
        processor::sort_rows(&mut table.rows, column, direction);
        Ok(())
    }

    /// Count, sum, average, max and min of `column`.
    pub fn analyze_column(&self, column: usize) -> Result<ColumnReport> {
        let table = self.non_empty_table()?;
        let column = table.column_index(column)?;
        Ok(processor::aggregate_column(
            &table.rows,
            column,
            &table.schema.columns[column],
        ))
    }

    /// Writes the table to the configured data file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&self.config.data_file)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        storage::save(self.table()?, path)
    }

    /// Replaces the schema and rows with the content of the configured data
    /// file.
    pub fn load(&mut self) -> Result<LoadSummary> {
        let path: PathBuf = self.config.data_file.clone();
        self.load_from(&path)
    }

    /// Replaces the schema and rows with the content of `path`.
    ///
    /// Malformed rows are dropped. An empty file leaves the store without a
    /// schema. On error the current table is kept.
    pub fn load_from(&mut self, path: &Path) -> Result<LoadSummary> {
        self.table = storage::load(path)?;
        let summary = LoadSummary {
            columns: self.schema().map_or(0, Schema::len),
            rows: self.row_count(),
        };
        info!(columns = summary.columns, rows = summary.rows, "table replaced");
        Ok(summary)
    }

    fn table(&self) -> Result<&Table> {
        self.table.as_ref().ok_or(StoreError::NoSchema)
    }

    fn table_mut(&mut self) -> Result<&mut Table> {
        self.table.as_mut().ok_or(StoreError::NoSchema)
    }

    fn non_empty_table(&self) -> Result<&Table> {
        let table = self.table()?;
        if table.rows.is_empty() {
            return Err(StoreError::EmptyTable);
        }
        Ok(table)
    }

    fn non_empty_table_mut(&mut self) -> Result<&mut Table> {
        let table = self.table_mut()?;
        if table.rows.is_empty() {
            return Err(StoreError::EmptyTable);
        }
        Ok(table)
    }
}

const CELL_WIDTH: usize = 15;

impl fmt::Display for TableView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(CELL_WIDTH * self.columns.len().max(1));
        writeln!(f, "{rule}")?;
        write_cells(f, self.columns)?;
        writeln!(f, "{rule}")?;
        for row in self.rows {
            write_cells(f, row)?;
        }
        writeln!(f, "{rule}")?;
        write!(f, "{} rows", self.row_count())
    }
}

fn write_cells(f: &mut fmt::Formatter<'_>, cells: &[String]) -> fmt::Result {
    for cell in cells {
        write!(f, "{cell:<CELL_WIDTH$}")?;
    }
    writeln!(f)
}
