use super::options::{CompressionMode, SessionOptions};
use super::snapshot;
use anyhow::{Context, Result, anyhow};
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use fs2::FileExt;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Key/value storage for persisted drawings.
///
/// A missing key is `Ok(None)`, never an error. A value that exists but cannot
/// be read is an error.
pub trait SnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
    /// Returns whether anything was removed.
    fn remove(&mut self, key: &str) -> Result<bool>;
}

/// Store keeping values in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        Ok(self.entries.remove(key).is_some())
    }
}

/// Store writing one file per key below [`SessionOptions::base_dir`].
///
/// Writes go through a temporary file and a rename, guarded by an exclusive
/// lock on a sibling `.lock` file; reads take a shared lock.
#[derive(Debug, Clone)]
pub struct FileStore {
    options: SessionOptions,
}

impl FileStore {
    pub fn new(options: SessionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    fn open_lock(&self, key: &str) -> Result<File> {
        let lock_path = self.options.lock_path(key);
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("failed to open snapshot lock file {}", lock_path.display()))
    }
}

impl SnapshotStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.options.file_path(key);
        if !path.exists() {
            debug!("No snapshot file present at {}, skipping load", path.display());
            return Ok(None);
        }

        let metadata = fs::metadata(&path)
            .with_context(|| format!("failed to stat snapshot file {}", path.display()))?;
        if metadata.len() > self.options.max_file_size_bytes {
            return Err(anyhow!(
                "snapshot file {} is {} bytes which exceeds the configured limit ({} bytes); refusing to load",
                path.display(),
                metadata.len(),
                self.options.max_file_size_bytes
            ));
        }

        let lock_file = self.open_lock(key)?;
        FileExt::lock_shared(&lock_file)
            .with_context(|| format!("failed to acquire shared lock for {}", path.display()))?;

        let result = read_payload(&path);

        FileExt::unlock(&lock_file)
            .unwrap_or_else(|err| warn!("failed to unlock snapshot file {}: {}", path.display(), err));

        result.map(|(text, _)| Some(text))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        let options = &self.options;
        fs::create_dir_all(&options.base_dir).with_context(|| {
            format!(
                "failed to create snapshot directory {}",
                options.base_dir.display()
            )
        })?;

        let lock_file = self.open_lock(key)?;
        FileExt::lock_exclusive(&lock_file)
            .with_context(|| format!("failed to lock snapshot key '{}'", key))?;

        let result = write_payload(&options.file_path(key), value.as_bytes(), options);

        FileExt::unlock(&lock_file)
            .unwrap_or_else(|err| warn!("failed to unlock snapshot key '{}': {}", key, err));

        result
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let removed = remove_file_if_exists(&self.options.file_path(key))?;
        remove_file_if_exists(&self.options.lock_path(key))?;
        Ok(removed)
    }
}

/// Result of clearing the stored drawing.
#[derive(Debug, Clone, Copy)]
pub struct ClearOutcome {
    pub removed_snapshot: bool,
    pub removed_lock: bool,
}

/// Summary information about the stored drawing.
#[derive(Debug, Clone)]
pub struct SnapshotInspection {
    pub path: PathBuf,
    pub exists: bool,
    pub size_bytes: Option<u64>,
    pub modified: Option<SystemTime>,
    pub compressed: bool,
    /// Cells per side, when the stored data decodes cleanly.
    pub dimension: Option<u32>,
    /// Set when the file exists but does not decode.
    pub corrupt: bool,
}

/// Remove the stored snapshot and its lock file.
pub fn clear_snapshot(options: &SessionOptions) -> Result<ClearOutcome> {
    let removed_snapshot = remove_file_if_exists(&options.snapshot_file_path())?;
    let removed_lock = remove_file_if_exists(&options.lock_path(&options.key))?;
    Ok(ClearOutcome {
        removed_snapshot,
        removed_lock,
    })
}

/// Inspect the stored snapshot for CLI reporting.
pub fn inspect_snapshot(options: &SessionOptions) -> Result<SnapshotInspection> {
    let path = options.snapshot_file_path();
    let metadata = fs::metadata(&path).ok();

    let mut inspection = SnapshotInspection {
        exists: metadata.is_some(),
        size_bytes: metadata.as_ref().map(|m| m.len()),
        modified: metadata.as_ref().and_then(|m| m.modified().ok()),
        path,
        compressed: false,
        dimension: None,
        corrupt: false,
    };

    if inspection.exists {
        let (text, compressed) = read_payload(&inspection.path)?;
        inspection.compressed = compressed;
        match snapshot::decode(&text) {
            Ok(decoded) => inspection.dimension = Some(decoded.dimension()),
            Err(err) => {
                warn!("{}", err);
                inspection.corrupt = true;
            }
        }
    }

    Ok(inspection)
}

fn read_payload(path: &Path) -> Result<(String, bool)> {
    let mut file_bytes = Vec::new();
    File::open(path)
        .with_context(|| format!("failed to open snapshot file {}", path.display()))?
        .read_to_end(&mut file_bytes)
        .context("failed to read snapshot file")?;

    let compressed = is_gzip(&file_bytes);
    let decompressed = if compressed {
        let mut decoder = GzDecoder::new(&file_bytes[..]);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .context("failed to decompress snapshot file")?;
        out
    } else {
        file_bytes
    };

    let text = String::from_utf8(decompressed).context("snapshot file is not valid UTF-8")?;
    Ok((text, compressed))
}

fn write_payload(path: &Path, payload: &[u8], options: &SessionOptions) -> Result<()> {
    let should_compress = match options.compression {
        CompressionMode::Off => false,
        CompressionMode::On => true,
        CompressionMode::Auto => (payload.len() as u64) >= options.auto_compress_threshold_bytes,
    };

    let bytes = if should_compress {
        compress_bytes(payload)?
    } else {
        payload.to_vec()
    };

    if bytes.len() as u64 > options.max_file_size_bytes {
        warn!(
            "Snapshot size {} bytes exceeds the configured limit of {} bytes; skipping save",
            bytes.len(),
            options.max_file_size_bytes
        );
        return Ok(());
    }

    let tmp_path = temp_path(path);
    {
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .with_context(|| {
                format!(
                    "failed to open temporary snapshot file {}",
                    tmp_path.display()
                )
            })?;
        tmp_file
            .write_all(&bytes)
            .context("failed to write snapshot payload")?;
        tmp_file
            .sync_all()
            .context("failed to sync temporary snapshot file")?;
    }

    fs::rename(&tmp_path, path).with_context(|| {
        format!(
            "failed to move temporary snapshot file {} -> {}",
            tmp_path.display(),
            path.display()
        )
    })?;

    debug!(
        "Snapshot saved to {} ({} bytes, compression={})",
        path.display(),
        bytes.len(),
        should_compress
    );

    Ok(())
}

fn remove_file_if_exists(path: &Path) -> Result<bool> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("failed to remove {}", path.display()))?;
        info!("Removed {}", path.display());
        Ok(true)
    } else {
        Ok(false)
    }
}

fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .context("failed to compress snapshot payload")?;
    encoder
        .finish()
        .context("failed to finalise compressed snapshot payload")
}

fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() > 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}

fn temp_path(target: &Path) -> PathBuf {
    let mut candidate = target.with_extension("json.tmp");
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = target.with_extension(format!("json.tmp{}", counter));
    }
    candidate
}
