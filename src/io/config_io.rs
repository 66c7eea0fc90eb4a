use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::storage::atomic_write;
use crate::model::config::{Config, ThemeMode};

/// Config file name inside the data directory
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

fn read_config_text(data_dir: &Path) -> Result<String, ConfigError> {
    let path = config_path(data_dir);
    match fs::read_to_string(&path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(ConfigError::ReadError { path, source: e }),
    }
}

/// Read config.toml; a missing file means all defaults.
pub fn read_config(data_dir: &Path) -> Result<Config, ConfigError> {
    let text = read_config_text(data_dir)?;
    Ok(toml::from_str(&text)?)
}

/// Set `[ui] theme` in the document, creating the table if needed
pub fn set_theme(doc: &mut toml_edit::DocumentMut, mode: ThemeMode) {
    if !doc.get("ui").is_some_and(|ui| ui.is_table_like()) {
        doc["ui"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["ui"]["theme"] = toml_edit::value(mode.as_str());
}

/// Persist the theme preference, leaving the rest of config.toml as written.
/// A file that no longer parses is moved aside to `config.toml.bak` and
/// replaced, so saving the theme also repairs a broken config.
pub fn save_theme(data_dir: &Path, mode: ThemeMode) -> Result<(), ConfigError> {
    let path = config_path(data_dir);
    let text = read_config_text(data_dir)?;
    let mut doc = match text.parse::<toml_edit::DocumentMut>() {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("event=config_parse status=replaced error={}", e);
            let bak = path.with_extension("toml.bak");
            fs::write(&bak, &text).map_err(|e| ConfigError::WriteError {
                path: bak.clone(),
                source: e,
            })?;
            toml_edit::DocumentMut::new()
        }
    };
    set_theme(&mut doc, mode);

    fs::create_dir_all(data_dir).map_err(|e| ConfigError::WriteError {
        path: path.clone(),
        source: e,
    })?;
    atomic_write(&path, doc.to_string().as_bytes())
        .map_err(|e| ConfigError::WriteError { path, source: e })?;
    log::info!("event=theme_save theme={} status=ok", mode);
    Ok(())
}
