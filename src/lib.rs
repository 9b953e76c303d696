pub mod config;
pub mod error;
pub mod processor;
pub mod search;
pub mod storage;
pub mod store;
pub mod table;
pub mod value;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use processor::{ColumnReport, NumericSummary, SortDirection};
pub use search::SearchResult;
pub use store::{LoadSummary, TableStore, TableView};
pub use table::{Row, Schema, Table};
pub use value::CellValue;
