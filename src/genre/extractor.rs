use super::keyword_table::KeywordTable;

/// Map a transcript to genre labels.
///
/// A label is detected when any of its keywords occurs anywhere in the
/// lowercased transcript (plain substring, so `classic` also fires on
/// `classical`). Labels come out once each, in the order their first
/// keyword appears in `table`.
pub fn extract_genres(table: &KeywordTable, transcript: &str) -> Vec<String> {
    let lower = transcript.to_lowercase();
    let mut detected: Vec<String> = Vec::new();

    for (keyword, label) in table.entries() {
        if lower.contains(keyword) && !detected.iter().any(|l| l == label) {
            detected.push(label.to_string());
        }
    }

    detected
}
