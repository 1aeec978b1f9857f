use crate::config::{SnapshotCompression, StorageConfig};
use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

pub const DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES: u64 = 100 * 1024; // 100 KiB

/// Compression preference for snapshot files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    /// Always write plain JSON.
    Off,
    /// Always write gzip-compressed JSON.
    On,
    /// Write gzip when payload exceeds the configured threshold.
    Auto,
}

/// Runtime options derived from configuration for snapshot persistence.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub base_dir: PathBuf,
    pub key: String,
    pub max_file_size_bytes: u64,
    pub compression: CompressionMode,
    pub auto_compress_threshold_bytes: u64,
}

impl SessionOptions {
    /// Creates an options struct with defaults. Intended mainly for tests.
    pub fn new(base_dir: PathBuf, key: impl Into<String>) -> Self {
        Self {
            base_dir,
            key: key.into(),
            max_file_size_bytes: 10 * 1024 * 1024,
            compression: CompressionMode::Off,
            auto_compress_threshold_bytes: DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES,
        }
    }

    /// Path of the data file holding `key`.
    pub fn file_path(&self, key: &str) -> PathBuf {
        self.base_dir
            .join(format!("{}.json", sanitize_identifier(key)))
    }

    /// Path of the lock file guarding `key`.
    pub fn lock_path(&self, key: &str) -> PathBuf {
        self.base_dir
            .join(format!("{}.lock", sanitize_identifier(key)))
    }

    /// Data file for the configured key.
    pub fn snapshot_file_path(&self) -> PathBuf {
        self.file_path(&self.key)
    }
}

/// Build runtime storage options from configuration values.
pub fn options_from_config(storage_cfg: &StorageConfig) -> Result<SessionOptions> {
    let base_dir = match &storage_cfg.directory {
        Some(raw) => {
            let expanded = expand_tilde(raw);
            if expanded.as_os_str().is_empty() {
                return Err(anyhow!("storage.directory resolved to an empty path"));
            }
            expanded
        }
        None => dirs::data_dir()
            .ok_or_else(|| anyhow!("Could not find data directory"))?
            .join("pixelcanvas"),
    };

    let mut options = SessionOptions::new(base_dir, storage_cfg.key.clone());
    options.max_file_size_bytes = storage_cfg
        .max_file_size_mb
        .saturating_mul(1024 * 1024)
        .max(1);
    options.auto_compress_threshold_bytes = storage_cfg
        .auto_compress_threshold_kb
        .saturating_mul(1024)
        .max(1);
    options.compression = match storage_cfg.compress {
        SnapshotCompression::Auto => CompressionMode::Auto,
        SnapshotCompression::On => CompressionMode::On,
        SnapshotCompression::Off => CompressionMode::Off,
    };

    Ok(options)
}

pub(crate) fn sanitize_identifier(raw: &str) -> String {
    if raw.is_empty() {
        return "default".to_string();
    }

    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    Path::new(path).to_path_buf()
}
