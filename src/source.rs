//! Media index collaborator
//!
//! The pipeline only consumes flat snapshots. How a source obtains them
//! (device media index, fixture, cache) is up to the implementation, and
//! any access failure must surface as an empty vector.

use std::sync::RwLock;

use crate::models::{MediaItem, MediaRecord};

pub trait MediaSource: Send + Sync {
    /// Every image and video record, images first
    fn records(&self) -> Vec<MediaRecord>;

    /// Items of one bucket, in any order
    fn bucket_items(&self, bucket_id: &str) -> Vec<MediaItem>;
}

/// Snapshot-backed source, replaceable between loads
#[derive(Debug, Default)]
pub struct InMemoryMediaSource {
    items: RwLock<Vec<MediaItem>>,
}

impl InMemoryMediaSource {
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Swap in a fresh snapshot for the next load
    pub fn replace(&self, items: Vec<MediaItem>) -> Result<(), String> {
        let mut guard = self.items.write().map_err(|e| e.to_string())?;
        *guard = items;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MediaSource for InMemoryMediaSource {
    fn records(&self) -> Vec<MediaRecord> {
        let Ok(items) = self.items.read() else {
            log::warn!("Media snapshot unavailable, returning no records");
            return Vec::new();
        };
        let images = items.iter().filter(|i| !i.is_video);
        let videos = items.iter().filter(|i| i.is_video);
        images.chain(videos).map(MediaRecord::from).collect()
    }

    fn bucket_items(&self, bucket_id: &str) -> Vec<MediaItem> {
        match self.items.read() {
            Ok(items) => items
                .iter()
                .filter(|i| i.bucket_id == bucket_id)
                .cloned()
                .collect(),
            Err(_) => {
                log::warn!("Media snapshot unavailable, returning no items");
                Vec::new()
            }
        }
    }
}
