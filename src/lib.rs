//! Album folder classification for a device media inventory.
//!
//! Takes flat media index snapshots and produces the album tree, the
//! special folders list and per-bucket item listings, delivering each
//! through the session's sinks.

pub mod background;
pub mod commands;
pub mod config;
pub mod folders;
pub mod models;
pub mod publish;
pub mod source;
pub mod state;

pub use config::GalleryConfig;
pub use folders::{build_album_tree, build_folder_tree};
pub use models::{FolderNode, MediaItem, MediaRecord, PageEvent, RootKind};
pub use source::{InMemoryMediaSource, MediaSource};
pub use state::GallerySession;
