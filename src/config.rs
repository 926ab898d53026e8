//! Presentation constants for the album folder pipeline
//!
//! Hosts can ship these as JSON; every field falls back to its default
//! when absent.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GalleryConfig {
    /// Separator between relative path segments
    pub path_delimiter: char,

    /// Appended to a folder's name and path to form its direct-files child
    pub virtual_suffix: String,

    /// Folder always shown as one flat bucket (case-insensitive name match)
    pub flattened_folder: String,

    /// Root-level folder inserted as a placeholder when absent
    pub guaranteed_folder: String,

    /// Display name of the synthetic "everything" node
    pub all_resource_name: String,

    /// Path and bucket id of the synthetic "everything" node
    pub all_resource_id: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            path_delimiter: '/',
            virtual_suffix: "_CHILD".to_string(),
            flattened_folder: "Download".to_string(),
            guaranteed_folder: "Movies".to_string(),
            all_resource_name: "ALL RESOURCE".to_string(),
            all_resource_id: "ALL_RESOURCE".to_string(),
        }
    }
}

impl GalleryConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    pub fn is_flattened(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(&self.flattened_folder)
    }
}
