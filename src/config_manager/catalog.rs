use serde::{Deserialize, Serialize};

/// Book catalog (CSV) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(rename = "books_file")]
    #[serde(default = "default_books_file")]
    pub books_file: String,

    #[serde(rename = "title_column")]
    #[serde(default = "default_title_column")]
    pub title_column: String,

    #[serde(rename = "author_column")]
    #[serde(default = "default_author_column")]
    pub author_column: String,

    #[serde(rename = "genre_column")]
    #[serde(default = "default_genre_column")]
    pub genre_column: String,

    #[serde(rename = "max_results")]
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_books_file() -> String {
    "books_with_clean_genres.csv".to_string()
}

fn default_title_column() -> String {
    "Title".to_string()
}

fn default_author_column() -> String {
    "Author".to_string()
}

fn default_genre_column() -> String {
    "genres".to_string()
}

fn default_max_results() -> usize {
    5
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            books_file: default_books_file(),
            title_column: default_title_column(),
            author_column: default_author_column(),
            genre_column: default_genre_column(),
            max_results: default_max_results(),
        }
    }
}
