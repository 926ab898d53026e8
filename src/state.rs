//! Session state
//!
//! One session per gallery screen:
//! - the serial load queue every load request goes through
//! - one sink per output stream
//! - the UI chrome state shared between pager pages
//! - event relays between the host screen and its pages

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::background::LoadQueue;
use crate::config::GalleryConfig;
use crate::models::{FolderNode, GalleryUiState, MediaItem, PageEvent, ZoomAction};
use crate::publish::{Broadcast, LatestValue};

pub struct GallerySession {
    pub config: Arc<GalleryConfig>,

    /// Serial worker shared by every folder and item load
    pub queue: LoadQueue,

    /// Album tree, published as a one-element list holding the "All" node
    pub album_folders: Arc<Broadcast<Vec<FolderNode>>>,

    /// Well-known buckets in priority order
    pub special_folders: Arc<Broadcast<Vec<FolderNode>>>,

    /// Items of the last requested bucket, newest first
    pub media_items: Arc<LatestValue<Vec<MediaItem>>>,

    /// Visibility of title and filter chrome
    pub ui_state: LatestValue<GalleryUiState>,

    pub zoom_action: LatestValue<ZoomAction>,

    /// Host to pages. Pages read the last event whenever they attach.
    pub parent_events: LatestValue<PageEvent>,

    /// Pages to host, delivered once to each live subscriber
    pub child_events: Broadcast<PageEvent>,

    /// Result of the last activity launched by the host, for the page that asked
    pub activity_results: LatestValue<PageEvent>,

    /// Page currently shown by the hosting pager
    current_page_index: AtomicUsize,
}

impl Default for GallerySession {
    fn default() -> Self {
        Self::new(GalleryConfig::default())
    }
}

impl GallerySession {
    pub fn new(config: GalleryConfig) -> Self {
        Self {
            config: Arc::new(config),
            queue: LoadQueue::new(),
            album_folders: Arc::new(Broadcast::new()),
            special_folders: Arc::new(Broadcast::new()),
            media_items: Arc::new(LatestValue::new()),
            ui_state: LatestValue::with_initial(GalleryUiState::default()),
            zoom_action: LatestValue::new(),
            parent_events: LatestValue::new(),
            child_events: Broadcast::new(),
            activity_results: LatestValue::new(),
            current_page_index: AtomicUsize::new(0),
        }
    }

    pub fn current_page_index(&self) -> usize {
        self.current_page_index.load(Ordering::SeqCst)
    }

    pub fn set_current_page_index(&self, index: usize) {
        self.current_page_index.store(index, Ordering::SeqCst);
    }

    /// Current UI state, falling back to the all-visible default
    pub fn current_ui_state(&self) -> GalleryUiState {
        self.ui_state.get().unwrap_or_default()
    }
}
