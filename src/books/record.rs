use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// How a column's cells are emitted as JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    /// Narrowest kind that holds every non-empty cell
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a str>) -> Self {
        let mut kind = ColumnKind::Integer;
        for cell in cells {
            if cell.is_empty() {
                continue;
            }
            if kind == ColumnKind::Integer && cell.parse::<i64>().is_ok() {
                continue;
            }
            if cell.parse::<f64>().map(f64::is_finite).unwrap_or(false) {
                kind = ColumnKind::Float;
                continue;
            }
            return ColumnKind::Text;
        }
        kind
    }
}

/// Header names and cell kinds shared by every row of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    names: Vec<String>,
    kinds: Vec<ColumnKind>,
}

impl Columns {
    /// `kinds` shorter than `names` is padded with `Text`
    pub fn new(names: Vec<String>, mut kinds: Vec<ColumnKind>) -> Self {
        kinds.resize(names.len(), ColumnKind::Text);
        Self { names, kinds }
    }

    pub fn text(names: Vec<String>) -> Self {
        Self::new(names, Vec::new())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// One catalog row with every source column, in source order.
///
/// Rows loaded from the same file share one column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    columns: Arc<Columns>,
    values: Vec<String>,
}

impl BookRecord {
    /// Pair `values` with `columns`; missing trailing values become empty
    /// strings and values past the last header are dropped.
    pub fn new(columns: Arc<Columns>, mut values: Vec<String>) -> Self {
        values.resize(columns.len(), String::new());
        Self { columns, values }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .names
            .iter()
            .position(|h| h == column)
            .map(|idx| self.values[idx].as_str())
    }

    pub(crate) fn value_at(&self, idx: usize) -> &str {
        self.values.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .names
            .iter()
            .zip(self.values.iter())
            .map(|(h, v)| (h.as_str(), v.as_str()))
    }
}

impl Serialize for BookRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for ((header, value), kind) in self.columns().zip(self.columns.kinds.iter()) {
            if value.is_empty() {
                map.serialize_entry(header, &None::<&str>)?;
                continue;
            }
            match kind {
                ColumnKind::Integer => match value.parse::<i64>() {
                    Ok(n) => map.serialize_entry(header, &n)?,
                    Err(_) => map.serialize_entry(header, value)?,
                },
                ColumnKind::Float => match value.parse::<f64>() {
                    Ok(n) => map.serialize_entry(header, &n)?,
                    Err(_) => map.serialize_entry(header, value)?,
                },
                ColumnKind::Text => map.serialize_entry(header, value)?,
            }
        }
        map.end()
    }
}
