//! Configuration for the Extractor

use crate::error::ExtractorError;
use folio_domain::LoaderOptions;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 100 MiB
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 100 * 1024 * 1024;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Largest accepted payload (bytes)
    pub max_file_size_bytes: u64,

    /// Pages extracted at most; the rest are dropped and flagged as truncated
    pub max_pages: usize,

    /// Pages extracted concurrently within one batch
    pub batch_size: usize,

    /// Cooperative pause between batches (milliseconds)
    pub batch_pause_ms: u64,

    /// Wall-clock budget for one document (seconds)
    pub document_timeout_secs: u64,

    /// Lines scanned for section header candidates
    pub section_scan_lines: usize,

    /// Section header candidates kept
    pub max_sections: usize,

    /// Resource limits for the document loader
    pub loader: LoaderOptions,
}

impl ExtractorConfig {
    /// Get the document timeout as a Duration
    pub fn document_timeout(&self) -> Duration {
        Duration::from_secs(self.document_timeout_secs)
    }

    /// Get the inter-batch pause as a Duration
    pub fn batch_pause(&self) -> Duration {
        Duration::from_millis(self.batch_pause_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.max_file_size_bytes == 0 {
            return Err(ExtractorError::Config(
                "max_file_size_bytes must be greater than 0".to_string(),
            ));
        }
        if self.max_pages == 0 {
            return Err(ExtractorError::Config(
                "max_pages must be greater than 0".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(ExtractorError::Config(
                "batch_size must be greater than 0".to_string(),
            ));
        }
        if self.document_timeout_secs == 0 {
            return Err(ExtractorError::Config(
                "document_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            max_pages: 100,
            batch_size: 5,
            batch_pause_ms: 10,
            document_timeout_secs: 300,
            section_scan_lines: 50,
            max_sections: 15,
            loader: LoaderOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_file_size_bytes, 104_857_600);
        assert_eq!(config.max_pages, 100);
        assert_eq!(config.batch_size, 5);
    }

    #[test]
    fn test_invalid_batch_size() {
        let config = ExtractorConfig {
            batch_size: 0,
            ..ExtractorConfig::default()
        };
        assert!(matches!(config.validate(), Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_invalid_max_pages() {
        let config = ExtractorConfig {
            max_pages: 0,
            ..ExtractorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = ExtractorConfig::from_toml("max_pages = 20\n").unwrap();
        assert_eq!(parsed.max_pages, 20);
        assert_eq!(parsed.batch_size, 5);
        assert!(parsed.loader.strip_embedded_images);
    }

    #[test]
    fn test_toml_rejects_invalid_values() {
        assert!(ExtractorConfig::from_toml("batch_size = 0\n").is_err());
        assert!(ExtractorConfig::from_toml("batch_size = \"five\"\n").is_err());
    }
}
