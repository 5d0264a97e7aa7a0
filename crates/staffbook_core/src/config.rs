//! Record store configuration.
//!
//! # Invariants
//! - `storage_key` is the single key the whole collection is persisted under.
//! - Unreadable blobs are copied to `backup_key()` before they can be overwritten.

/// Default storage key for the serialized collection.
pub const DEFAULT_STORAGE_KEY: &str = "employees";
/// Default file name offered for delimited exports.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "employees.csv";

/// Static settings for one record store instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key-value key holding the JSON collection blob.
    pub storage_key: String,
    /// File name adapters should use when saving an export.
    pub export_file_name: String,
}

impl StoreConfig {
    /// Overrides the storage key; blank values keep the default.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        let trimmed = key.trim();
        if !trimmed.is_empty() {
            self.storage_key = trimmed.to_string();
        }
        self
    }

    /// Key holding the last blob that could not be fully decoded.
    pub fn backup_key(&self) -> String {
        format!("{}.unreadable", self.storage_key)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StoreConfig;

    #[test]
    fn blank_storage_key_keeps_default() {
        let config = StoreConfig::default().with_storage_key("   ");
        assert_eq!(config.storage_key, "employees");
        assert_eq!(config.export_file_name, "employees.csv");
    }

    #[test]
    fn storage_key_is_trimmed() {
        let config = StoreConfig::default().with_storage_key(" staff ");
        assert_eq!(config.storage_key, "staff");
        assert_eq!(config.backup_key(), "staff.unreadable");
    }
}
