use std::path::{Path, PathBuf};

use uuid::Uuid;

const DEFAULT_USER: &str = "guest";

/// Reduce a user-supplied name to `[A-Za-z0-9_-]`, at most 64 chars.
///
/// Anything that would leave nothing behind becomes `guest`.
pub fn sanitize_user(user: &str) -> String {
    let cleaned: String = user
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .take(64)
        .collect();

    if cleaned.chars().all(|c| c == '_') {
        DEFAULT_USER.to_string()
    } else {
        cleaned
    }
}

/// `<dir>/<user>_<unix_seconds>.wav`, with a short suffix if that name is taken
pub fn recording_path(dir: &Path, user: &str, unix_seconds: i64) -> PathBuf {
    let user = sanitize_user(user);
    let path = dir.join(format!("{}_{}.wav", user, unix_seconds));
    if !path.exists() {
        return path;
    }
    let suffix = Uuid::new_v4().as_simple().to_string();
    dir.join(format!("{}_{}_{}.wav", user, unix_seconds, &suffix[..8]))
}
