pub mod catalog;
pub mod record;

pub use catalog::{BookCatalog, CatalogError, LoadedCatalog};
pub use record::{BookRecord, ColumnKind, Columns};
