//! CLI configuration

use std::path::PathBuf;

/// Default database file under the user data directory
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stemma")
        .join("stemma.db")
}
