pub mod extractor;
pub mod keyword_table;

pub use extractor::extract_genres;
pub use keyword_table::KeywordTable;
