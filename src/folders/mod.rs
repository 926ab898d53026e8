//! Album folder classification
//!
//! Turns the flat media inventory into the hierarchical album tree
//! (per-node counts and covers, virtual direct-files children, the
//! flattened Download folder, the guaranteed Movies folder) and into the
//! flat special folders list.

mod buckets;
mod direct;
mod special;
mod tree;
mod wrap;

pub use buckets::{aggregate_buckets, select_special_folders, SpecialFoldersSelector};
pub use direct::DirectFileTracker;
pub use special::SpecialFolderPostProcessor;
pub use tree::{build_folder_tree, ArenaNode, FolderArena, FolderTreeBuilder, NodeId};
pub use wrap::{wrap_all_resource, RootWrapper};

use crate::config::GalleryConfig;
use crate::models::{FolderNode, MediaRecord};

/// Split a relative path into its non-empty segments.
///
/// Leading, trailing and repeated delimiters produce no segments.
pub fn segment_path(path: &str, delimiter: char) -> Vec<&str> {
    path.split(delimiter).filter(|s| !s.is_empty()).collect()
}

/// Key a record is filed under for direct-file bookkeeping: its relative
/// path with one trailing delimiter removed.
pub fn folder_key(path: &str, delimiter: char) -> &str {
    path.strip_suffix(delimiter).unwrap_or(path)
}

/// Full album pipeline: build, apply the special-folder rewrites, wrap
/// everything under the "All" node.
pub fn build_album_tree(records: &[MediaRecord], config: &GalleryConfig) -> FolderNode {
    let roots = build_folder_tree(records, config);
    RootWrapper::new(config).wrap(roots)
}
