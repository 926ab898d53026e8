use crate::config::GalleryConfig;
use crate::models::{FolderNode, RootKind};

/// Wrap the root-level folders into the synthetic "All" node
pub fn wrap_all_resource(roots: Vec<FolderNode>, config: &GalleryConfig) -> FolderNode {
    RootWrapper::new(config).wrap(roots)
}

pub struct RootWrapper<'a> {
    config: &'a GalleryConfig,
}

impl<'a> RootWrapper<'a> {
    pub fn new(config: &'a GalleryConfig) -> Self {
        Self { config }
    }

    /// The count is summed over the immediate roots, which already hold
    /// their subtree totals. The cover comes from the first root.
    pub fn wrap(&self, roots: Vec<FolderNode>) -> FolderNode {
        let item_count = roots.iter().map(|r| r.item_count).sum();
        let cover = roots.first().and_then(|r| r.cover.clone());

        FolderNode {
            bucket_id: self.config.all_resource_id.clone(),
            name: self.config.all_resource_name.clone(),
            path: self.config.all_resource_id.clone(),
            parent_path: String::new(),
            children: roots,
            item_count,
            cover,
            has_direct_media: false,
            is_virtual: false,
            root_kind: RootKind::All,
        }
    }
}
