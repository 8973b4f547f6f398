use crate::models::{Property, Wishlist};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when reading an exported snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML snapshot: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported snapshot format: {0}")]
    UnsupportedFormat(String),
}

/// Properties and wishlists exported from the app's document store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub wishlists: Vec<Wishlist>,
}

/// Supported snapshot encodings, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Toml,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(SnapshotFormat::Json),
            "toml" => Ok(SnapshotFormat::Toml),
            other => Err(SnapshotError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Parse snapshot text in the given format
pub fn parse_snapshot(text: &str, format: SnapshotFormat) -> Result<Snapshot, SnapshotError> {
    let snapshot: Snapshot = match format {
        SnapshotFormat::Json => serde_json::from_str(text)?,
        SnapshotFormat::Toml => toml::from_str(text)?,
    };

    tracing::debug!(
        "Parsed snapshot with {} properties and {} wishlists",
        snapshot.properties.len(),
        snapshot.wishlists.len()
    );

    Ok(snapshot)
}

/// Load a snapshot from a `.json` or `.toml` file
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot, SnapshotError> {
    let path = path.as_ref();
    let format = SnapshotFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    parse_snapshot(&text, format)
}
