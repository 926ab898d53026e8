use super::{ArenaNode, DirectFileTracker, FolderArena};
use crate::config::GalleryConfig;
use crate::models::MediaCover;

/// Presentation rewrites applied once the tree is fully aggregated:
/// direct-files virtual children, the flattened Download folder and the
/// guaranteed Movies folder.
pub struct SpecialFolderPostProcessor<'a> {
    config: &'a GalleryConfig,
}

impl<'a> SpecialFolderPostProcessor<'a> {
    pub fn new(config: &'a GalleryConfig) -> Self {
        Self { config }
    }

    pub fn process(&self, arena: &mut FolderArena, tracker: &DirectFileTracker) {
        // Only nodes from the build pass; virtual children added below are final.
        let built: Vec<_> = arena.ids().collect();
        let mut virtual_count = 0;

        for id in built {
            let direct_count = tracker.count_for(&arena.get(id).path);
            let has_direct_media = direct_count > 0;
            let is_flattened = self.config.is_flattened(&arena.get(id).name);

            arena.get_mut(id).has_direct_media = has_direct_media;

            if !is_flattened && has_direct_media {
                let node = arena.get(id);
                let virtual_child = ArenaNode {
                    name: format!("{}{}", node.name, self.config.virtual_suffix),
                    path: format!("{}{}", node.path, self.config.virtual_suffix),
                    parent_path: node.path.clone(),
                    item_count: direct_count,
                    cover: tracker.latest_for(&node.path).map(MediaCover::from_record),
                    has_direct_media: true,
                    is_virtual: true,
                    ..Default::default()
                };
                let child_id = arena.insert_detached(virtual_child);
                arena.get_mut(id).children.insert(0, child_id);
                virtual_count += 1;
            }

            if is_flattened {
                let node = arena.get_mut(id);
                node.children.clear();
                node.has_direct_media = true;
            }
        }

        let guaranteed = &self.config.guaranteed_folder;
        if arena.lookup(guaranteed).is_none() {
            arena.insert(ArenaNode {
                name: guaranteed.clone(),
                path: guaranteed.clone(),
                ..Default::default()
            });
            log::debug!("Inserted placeholder folder {}", guaranteed);
        }

        log::debug!("Special folders: {} virtual children added", virtual_count);
    }
}
