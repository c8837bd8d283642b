//! Writing configuration exports to disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use carconfig_engine::ConfigurationRecord;

/// Where an export lands: `requested` itself, or the record's default file
/// name inside it when `requested` is an existing directory.
pub fn export_path(requested: &Path, record: &ConfigurationRecord) -> PathBuf {
    if requested.is_dir() {
        requested.join(record.file_name())
    } else {
        requested.to_path_buf()
    }
}

/// Default file name for a saved catalog document.
pub const CATALOG_FILE_NAME: &str = "car-data-input.json";

/// Write a catalog document to `requested`, or to [`CATALOG_FILE_NAME`]
/// inside it when `requested` is an existing directory.
pub async fn write_catalog(requested: &Path, text: &str) -> Result<PathBuf> {
    let path = if requested.is_dir() {
        requested.join(CATALOG_FILE_NAME)
    } else {
        requested.to_path_buf()
    };
    tokio::fs::write(&path, format!("{text}\n"))
        .await
        .with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), "catalog saved");
    Ok(path)
}

/// Write `record` as pretty JSON and return the path written.
pub async fn write_export(requested: &Path, record: &ConfigurationRecord) -> Result<PathBuf> {
    let path = export_path(requested, record);
    let json = record.to_json_pretty().context("serialize configuration")?;
    tokio::fs::write(&path, format!("{json}\n"))
        .await
        .with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), "configuration exported");
    Ok(path)
}
