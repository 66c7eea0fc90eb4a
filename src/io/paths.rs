use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "PETO_HOME";

/// Resolve the data directory: explicit flag, then `PETO_HOME`, then
/// `$XDG_DATA_HOME/peto`, then `$HOME/.local/share/peto`.
pub fn data_dir(explicit: Option<&Path>) -> PathBuf {
    resolve_data_dir(explicit, |key| std::env::var(key).ok())
}

/// `data_dir` with an injectable environment lookup
pub fn resolve_data_dir(explicit: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    let non_empty = |key: &str| env(key).filter(|v| !v.is_empty()).map(PathBuf::from);
    if let Some(dir) = non_empty(DATA_DIR_ENV) {
        return dir;
    }
    let base = non_empty("XDG_DATA_HOME").unwrap_or_else(|| {
        non_empty("HOME")
            .unwrap_or_else(|| PathBuf::from("/"))
            .join(".local")
            .join("share")
    });
    base.join("peto")
}
