//! Backups: downloading every stored operation and restoring them again.

mod core;
mod export_endpoint;
mod import_endpoint;

pub use core::{BackupEntry, BackupRow, ImportRecord, export_all_operations, import_operations};
pub use export_endpoint::export_backup_endpoint;
pub use import_endpoint::import_backup_endpoint;
