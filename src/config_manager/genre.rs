use serde::{Deserialize, Serialize};

/// One keyword → label mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub keyword: String,
    pub label: String,
}

/// Genre extraction settings.
///
/// An empty `keywords` list keeps the built-in table. A non-empty list
/// replaces it entirely; entries are matched in the order given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenreConfig {
    #[serde(default)]
    pub keywords: Vec<KeywordEntry>,
}
