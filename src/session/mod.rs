//! Snapshot persistence (save/restore) support.
//!
//! Captures the grid coloring into a [`Snapshot`], encodes it as JSON with an
//! explicit dimension, and keeps it in a [`SnapshotStore`]: on disk with
//! locking and optional compression, or in memory.

mod options;
mod snapshot;
mod storage;

#[allow(unused_imports)]
pub use options::{
    CompressionMode, DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES, SessionOptions, options_from_config,
};
pub use snapshot::{
    Snapshot, StoredFormat, apply, capture, decode, decode_with_format, encode,
};
pub use storage::{
    ClearOutcome, FileStore, MemoryStore, SnapshotInspection, SnapshotStore, clear_snapshot,
    inspect_snapshot,
};
