//! Raw document facts exposed by a loader, and the loader's resource knobs

use serde::{Deserialize, Serialize};

/// Metadata fields embedded in the document itself
///
/// Every field is optional; an unreadable info dictionary is represented by
/// `EmbeddedMetadata::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedMetadata {
    /// Embedded title
    pub title: Option<String>,
    /// Embedded author line
    pub author: Option<String>,
    /// Embedded subject
    pub subject: Option<String>,
    /// Embedded keyword string, unsplit
    pub keywords: Option<String>,
    /// Producing application
    pub creator: Option<String>,
    /// PDF producer library
    pub producer: Option<String>,
    /// Creation date
    pub creation_date: Option<String>,
    /// Modification date
    pub modification_date: Option<String>,
}

impl EmbeddedMetadata {
    /// Embedded keywords split on commas and semicolons
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords
            .as_deref()
            .map(|raw| {
                raw.split([',', ';'])
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Resource limits applied while opening a document for text-only extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderOptions {
    /// Drop payloads of oversized embedded images after parsing
    #[serde(default = "default_strip_images")]
    pub strip_embedded_images: bool,

    /// Largest embedded image payload kept in memory (bytes)
    #[serde(default = "default_max_image_bytes")]
    pub max_embedded_image_bytes: usize,
}

fn default_strip_images() -> bool {
    true
}

fn default_max_image_bytes() -> usize {
    4 * 1024 * 1024
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            strip_embedded_images: default_strip_images(),
            max_embedded_image_bytes: default_max_image_bytes(),
        }
    }
}
