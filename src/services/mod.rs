// Service exports
pub mod snapshot;

pub use snapshot::{load_snapshot, parse_snapshot, Snapshot, SnapshotError, SnapshotFormat};
