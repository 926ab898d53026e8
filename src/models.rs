use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flat media record as supplied by the device media index
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MediaRecord {
    pub id: i64,
    pub bucket_id: String,
    pub bucket_name: Option<String>,
    /// `/`-delimited path under the storage root, usually with a trailing `/`
    pub relative_path: Option<String>,
    pub captured_at: DateTime<Utc>,
    pub mime_type: Option<String>,
    pub content_locator: String,
}

/// Media entry returned by a per-folder listing
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MediaItem {
    pub id: i64,
    pub bucket_id: String,
    pub bucket_name: Option<String>,
    pub relative_path: Option<String>,
    pub content_locator: String,
    pub mime_type: Option<String>,
    pub captured_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub size: u64,
    pub width: u32,
    pub height: u32,
    /// Playback length in milliseconds, 0 for still images
    pub duration_ms: u64,
    pub file_path: Option<String>,
    pub is_video: bool,
}

impl From<&MediaItem> for MediaRecord {
    fn from(item: &MediaItem) -> Self {
        MediaRecord {
            id: item.id,
            bucket_id: item.bucket_id.clone(),
            bucket_name: item.bucket_name.clone(),
            relative_path: item.relative_path.clone(),
            captured_at: item.captured_at,
            mime_type: item.mime_type.clone(),
            content_locator: item.content_locator.clone(),
        }
    }
}

/// Cover shown for a folder: the most recently captured item in scope
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MediaCover {
    pub locator: String,
    pub mime_type: Option<String>,
    pub captured_at: DateTime<Utc>,
}

impl MediaCover {
    pub fn from_record(record: &MediaRecord) -> Self {
        Self {
            locator: record.content_locator.clone(),
            mime_type: record.mime_type.clone(),
            captured_at: record.captured_at,
        }
    }

    /// True when `record` should replace this cover. Ties keep the current cover.
    pub fn is_older_than(&self, record: &MediaRecord) -> bool {
        record.captured_at > self.captured_at
    }
}

/// Presentation tag for well-known top-level folders.
///
/// Declaration order is the priority order used by the special folders view.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum RootKind {
    #[default]
    None,
    All,
    Camera,
    Movies,
    Download,
    Pictures,
}

impl RootKind {
    /// Kinds surfaced in the special folders view, in priority order
    pub const SPECIAL: [RootKind; 4] = [
        RootKind::Camera,
        RootKind::Movies,
        RootKind::Download,
        RootKind::Pictures,
    ];

    /// Substring a bucket path must contain to be tagged with this kind
    pub fn marker(self) -> Option<&'static str> {
        match self {
            RootKind::Camera => Some("Camera"),
            RootKind::Movies => Some("Movies"),
            RootKind::Download => Some("Download"),
            RootKind::Pictures => Some("Pictures"),
            RootKind::None | RootKind::All => None,
        }
    }

    /// First special kind whose marker occurs anywhere in `path`
    pub fn classify(path: &str) -> Option<RootKind> {
        Self::SPECIAL
            .into_iter()
            .find(|kind| kind.marker().is_some_and(|m| path.contains(m)))
    }
}

/// Folder node for the hierarchical album view
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct FolderNode {
    pub bucket_id: String,
    pub name: String,
    /// Unique key: cumulative `/`-joined segments
    pub path: String,
    /// Empty for root-level folders
    pub parent_path: String,
    pub children: Vec<FolderNode>,
    /// Items anywhere in this subtree
    pub item_count: usize,
    pub cover: Option<MediaCover>,
    pub has_direct_media: bool,
    pub is_virtual: bool,
    pub root_kind: RootKind,
}

impl FolderNode {
    pub fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.cover.as_ref().map(|c| c.captured_at)
    }

    pub fn is_root(&self) -> bool {
        self.parent_path.is_empty()
    }

    /// Depth-first lookup by path, including this node
    pub fn find(&self, path: &str) -> Option<&FolderNode> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(path))
    }

    /// Number of nodes in this subtree, including this node
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(FolderNode::node_count).sum::<usize>()
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| e.to_string())
    }
}

/// Visibility of the chrome around the gallery pager
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct GalleryUiState {
    pub filter_not_selected_container_visible: bool,
    pub filter_selected_container_visible: bool,
    pub filter_root_visible: bool,
    pub title_container_visible: bool,
    pub selection_title_root_visible: bool,
}

impl Default for GalleryUiState {
    fn default() -> Self {
        GalleryUiStateBuilder::new().build()
    }
}

/// Builder for [`GalleryUiState`]; starts from all-visible or from an existing state
#[derive(Debug, Clone)]
pub struct GalleryUiStateBuilder {
    state: GalleryUiState,
}

impl GalleryUiStateBuilder {
    pub fn new() -> Self {
        Self {
            state: GalleryUiState {
                filter_not_selected_container_visible: true,
                filter_selected_container_visible: true,
                filter_root_visible: true,
                title_container_visible: true,
                selection_title_root_visible: true,
            },
        }
    }

    pub fn from_state(state: &GalleryUiState) -> Self {
        Self { state: *state }
    }

    pub fn filter_not_selected_container_visible(mut self, visible: bool) -> Self {
        self.state.filter_not_selected_container_visible = visible;
        self
    }

    pub fn filter_selected_container_visible(mut self, visible: bool) -> Self {
        self.state.filter_selected_container_visible = visible;
        self
    }

    pub fn filter_root_visible(mut self, visible: bool) -> Self {
        self.state.filter_root_visible = visible;
        self
    }

    pub fn title_container_visible(mut self, visible: bool) -> Self {
        self.state.title_container_visible = visible;
        self
    }

    pub fn selection_title_root_visible(mut self, visible: bool) -> Self {
        self.state.selection_title_root_visible = visible;
        self
    }

    pub fn build(self) -> GalleryUiState {
        self.state
    }
}

impl Default for GalleryUiStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Column-count change requested by a pinch or menu action
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ZoomAction {
    /// More columns
    Increase,
    /// Fewer columns
    Decrease,
}

/// Opaque message relayed between the hosting screen and its pages
///
/// `action` names what happened ("select_all", "camera_result", ...) and
/// `payload` carries whatever the receiver needs for it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PageEvent {
    pub action: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl PageEvent {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            payload: serde_json::Value::Null,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}
