use tracing::warn;

use crate::config_manager::genre::GenreConfig;

/// Built-in keyword → label pairs, in match order
const DEFAULT_KEYWORDS: &[(&str, &str)] = &[
    ("mystery", "Thriller"),
    ("crime", "Thriller"),
    ("detective", "Thriller"),
    ("suspense", "Thriller"),
    ("history", "Non-fiction"),
    ("historical", "Non-fiction"),
    ("self-help", "Self-help"),
    ("motivation", "Self-help"),
    ("memoir", "Memoir"),
    ("biograph", "Memoir"),
    ("fiction", "Fiction"),
    ("fantasy", "Fiction"),
    ("science", "Non-fiction"),
    ("classic", "Classic"),
    ("romance", "Fiction"),
    ("adventure", "Fiction"),
    ("romantic", "Fiction"),
    ("thriller", "Thriller"),
    ("humour", "Humor"),
    ("comedy", "Comedy"),
];

/// Ordered keyword → genre label table.
///
/// Built once at startup and shared read-only. Keywords are stored
/// lowercase; several keywords may map to the same label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    entries: Vec<(String, String)>,
}

impl KeywordTable {
    /// Build a table from `(keyword, label)` pairs, keeping their order.
    ///
    /// Blank keywords or labels are skipped since a blank keyword would match
    /// every transcript.
    pub fn new<I, K, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: AsRef<str>,
        L: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .filter_map(|(keyword, label)| {
                let keyword = keyword.as_ref().trim().to_lowercase();
                let label = label.as_ref().trim().to_string();
                if keyword.is_empty() || label.is_empty() {
                    warn!("Skipping blank genre keyword entry ({:?} -> {:?})", keyword, label);
                    None
                } else {
                    Some((keyword, label))
                }
            })
            .collect();
        Self { entries }
    }

    /// Use the configured keywords, or the built-in table when none are set
    pub fn from_config(config: &GenreConfig) -> Self {
        if config.keywords.is_empty() {
            return Self::default();
        }
        Self::new(
            config
                .keywords
                .iter()
                .map(|entry| (entry.keyword.as_str(), entry.label.as_str())),
        )
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, l)| (k.as_str(), l.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}
