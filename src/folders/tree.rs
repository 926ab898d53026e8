use rustc_hash::FxHashMap;

use super::{folder_key, segment_path, DirectFileTracker, SpecialFolderPostProcessor};
use crate::config::GalleryConfig;
use crate::models::{FolderNode, MediaCover, MediaRecord, RootKind};

/// Build the root-level album folders from a flat record snapshot.
///
/// Applies the special-folder rewrites and returns roots sorted by name.
pub fn build_folder_tree(records: &[MediaRecord], config: &GalleryConfig) -> Vec<FolderNode> {
    let mut builder = FolderTreeBuilder::new(config);
    builder.add_records(records);

    let (mut arena, tracker) = builder.into_parts();
    SpecialFolderPostProcessor::new(config).process(&mut arena, &tracker);

    arena.into_sorted_roots()
}

/// Index of a node inside a [`FolderArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Folder node while the tree is still being built or rewritten.
///
/// Same shape as [`FolderNode`] but children are arena ids.
#[derive(Debug, Clone, Default)]
pub struct ArenaNode {
    pub bucket_id: String,
    pub name: String,
    pub path: String,
    pub parent_path: String,
    pub children: Vec<NodeId>,
    pub item_count: usize,
    pub cover: Option<MediaCover>,
    pub has_direct_media: bool,
    pub is_virtual: bool,
    pub root_kind: RootKind,
}

impl ArenaNode {
    /// Count `record` into this node's subtree aggregate
    fn absorb(&mut self, record: &MediaRecord) {
        self.item_count += 1;
        if self.cover.as_ref().map_or(true, |c| c.is_older_than(record)) {
            self.cover = Some(MediaCover::from_record(record));
        }
    }
}

/// Node storage for one pipeline run: nodes by id plus a path lookup.
///
/// Virtual nodes are stored but not registered in the path lookup.
#[derive(Debug, Default)]
pub struct FolderArena {
    nodes: Vec<ArenaNode>,
    by_path: FxHashMap<String, NodeId>,
}

impl FolderArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn lookup(&self, path: &str) -> Option<NodeId> {
        self.by_path.get(path).copied()
    }

    pub fn get(&self, id: NodeId) -> &ArenaNode {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut ArenaNode {
        &mut self.nodes[id.0]
    }

    /// Store a node and register its path
    pub fn insert(&mut self, node: ArenaNode) -> NodeId {
        let path = node.path.clone();
        let id = self.insert_detached(node);
        self.by_path.insert(path, id);
        id
    }

    /// Store a node without registering its path
    pub fn insert_detached(&mut self, node: ArenaNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Ids of every node currently stored, in creation order
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Registered nodes without a parent, in creation order
    pub fn root_ids(&self) -> Vec<NodeId> {
        self.ids()
            .filter(|&id| {
                let node = self.get(id);
                node.parent_path.is_empty() && self.lookup(&node.path) == Some(id)
            })
            .collect()
    }

    /// Freeze the arena into owned trees, roots ordered by name.
    ///
    /// Nodes no longer reachable from a root are dropped.
    pub fn into_sorted_roots(self) -> Vec<FolderNode> {
        let root_ids = self.root_ids();
        let mut slots: Vec<Option<ArenaNode>> = self.nodes.into_iter().map(Some).collect();

        let mut roots: Vec<FolderNode> = root_ids
            .into_iter()
            .filter_map(|id| take_subtree(&mut slots, id))
            .collect();
        roots.sort_by(|a, b| a.name.cmp(&b.name));
        roots
    }
}

fn take_subtree(slots: &mut [Option<ArenaNode>], id: NodeId) -> Option<FolderNode> {
    let node = slots.get_mut(id.0)?.take()?;
    let children = node
        .children
        .iter()
        .filter_map(|&child| take_subtree(slots, child))
        .collect();

    Some(FolderNode {
        bucket_id: node.bucket_id,
        name: node.name,
        path: node.path,
        parent_path: node.parent_path,
        children,
        item_count: node.item_count,
        cover: node.cover,
        has_direct_media: node.has_direct_media,
        is_virtual: node.is_virtual,
        root_kind: node.root_kind,
    })
}

/// Builder for the album folder tree.
///
/// Each record is walked from its first path segment to its last; every
/// prefix gets a node (created on first sight) and every node on the walk
/// counts the record, so counts and covers are subtree aggregates.
pub struct FolderTreeBuilder {
    delimiter: char,
    arena: FolderArena,
    tracker: DirectFileTracker,
    skipped: usize,
}

impl FolderTreeBuilder {
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            delimiter: config.path_delimiter,
            arena: FolderArena::new(),
            tracker: DirectFileTracker::new(),
            skipped: 0,
        }
    }

    pub fn add_records(&mut self, records: &[MediaRecord]) {
        for record in records {
            self.add_record(record);
        }
        log::debug!(
            "Folder tree: {} nodes from {} records ({} skipped)",
            self.arena.len(),
            records.len(),
            self.skipped
        );
    }

    /// Add one record to the tree. Returns false when the record has no
    /// usable path and was skipped.
    pub fn add_record(&mut self, record: &MediaRecord) -> bool {
        let Some(relative_path) = record.relative_path.as_deref() else {
            self.skipped += 1;
            return false;
        };
        let segments = segment_path(relative_path, self.delimiter);
        if segments.is_empty() {
            self.skipped += 1;
            return false;
        }

        let mut current_path = String::with_capacity(relative_path.len());
        let mut parent: Option<NodeId> = None;

        for segment in segments {
            if !current_path.is_empty() {
                current_path.push(self.delimiter);
            }
            current_path.push_str(segment);

            let id = self.visit(&current_path, segment, parent, record);
            parent = Some(id);
        }

        self.tracker
            .record(folder_key(relative_path, self.delimiter), record);
        true
    }

    /// Fetch or create the node for `path` under `parent`, then count
    /// `record` into it.
    ///
    /// `parent` must already exist; the walk guarantees it since prefixes
    /// are visited shortest first.
    pub fn visit(
        &mut self,
        path: &str,
        name: &str,
        parent: Option<NodeId>,
        record: &MediaRecord,
    ) -> NodeId {
        let id = match self.arena.lookup(path) {
            Some(id) => id,
            None => {
                let parent_path = parent
                    .map(|p| self.arena.get(p).path.clone())
                    .unwrap_or_default();
                let id = self.arena.insert(ArenaNode {
                    bucket_id: record.bucket_id.clone(),
                    name: name.to_string(),
                    path: path.to_string(),
                    parent_path,
                    ..Default::default()
                });
                if let Some(parent) = parent {
                    self.arena.get_mut(parent).children.push(id);
                }
                id
            }
        };

        self.arena.get_mut(id).absorb(record);
        id
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn tracker(&self) -> &DirectFileTracker {
        &self.tracker
    }

    pub fn into_parts(self) -> (FolderArena, DirectFileTracker) {
        (self.arena, self.tracker)
    }

    /// Root-level folders before any special-folder rewrite, sorted by name
    pub fn build(self) -> Vec<FolderNode> {
        self.arena.into_sorted_roots()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_record(id: i64, path: Option<&str>, secs: i64) -> MediaRecord {
        MediaRecord {
            id,
            bucket_id: format!("bucket-{}", path.unwrap_or("none")),
            bucket_name: None,
            relative_path: path.map(str::to_string),
            captured_at: Utc.timestamp_opt(secs, 0).unwrap(),
            mime_type: Some("image/jpeg".to_string()),
            content_locator: format!("content://media/{}", id),
        }
    }

    fn build_raw(records: &[MediaRecord]) -> Vec<FolderNode> {
        let mut builder = FolderTreeBuilder::new(&GalleryConfig::default());
        builder.add_records(records);
        builder.build()
    }

    fn find<'a>(roots: &'a [FolderNode], path: &str) -> &'a FolderNode {
        roots
            .iter()
            .find_map(|r| r.find(path))
            .unwrap_or_else(|| panic!("missing node {}", path))
    }

    #[test]
    fn test_counts_and_covers_aggregate_over_subtree() {
        let records = vec![
            make_record(1, Some("DCIM/Camera"), 5),
            make_record(2, Some("DCIM/Camera/x"), 9),
            make_record(3, Some("DCIM"), 3),
        ];
        let roots = build_raw(&records);

        let dcim = find(&roots, "DCIM");
        assert_eq!(dcim.item_count, 3);
        assert_eq!(dcim.cover.as_ref().unwrap().locator, "content://media/2");

        let camera = find(&roots, "DCIM/Camera");
        assert_eq!(camera.item_count, 2);
        assert_eq!(camera.parent_path, "DCIM");
        assert_eq!(camera.latest_timestamp(), Some(Utc.timestamp_opt(9, 0).unwrap()));

        let x = find(&roots, "DCIM/Camera/x");
        assert_eq!(x.item_count, 1);
    }

    #[test]
    fn test_skips_missing_and_empty_paths() {
        let mut builder = FolderTreeBuilder::new(&GalleryConfig::default());
        assert!(!builder.add_record(&make_record(1, None, 1)));
        assert!(!builder.add_record(&make_record(2, Some(""), 1)));
        assert!(!builder.add_record(&make_record(3, Some("//"), 1)));
        assert!(builder.add_record(&make_record(4, Some("DCIM/"), 1)));
        assert_eq!(builder.skipped(), 3);

        let roots = builder.build();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].item_count, 1);
    }

    #[test]
    fn test_roots_sorted_children_in_insertion_order() {
        let records = vec![
            make_record(1, Some("Pictures/b/"), 1),
            make_record(2, Some("DCIM/"), 1),
            make_record(3, Some("Pictures/a/"), 1),
            make_record(4, Some("Alarms/"), 1),
        ];
        let roots = build_raw(&records);

        let names: Vec<&str> = roots.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alarms", "DCIM", "Pictures"]);

        let pictures = find(&roots, "Pictures");
        let children: Vec<&str> = pictures.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(children, vec!["b", "a"]);
    }

    #[test]
    fn test_root_sort_is_ordinal() {
        let records = vec![
            make_record(1, Some("b/"), 1),
            make_record(2, Some("B/"), 1),
            make_record(3, Some("a/"), 1),
        ];
        let names: Vec<String> = build_raw(&records).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["B", "a", "b"]);
    }

    #[test]
    fn test_cover_tie_keeps_first_seen() {
        let records = vec![
            make_record(1, Some("DCIM/"), 7),
            make_record(2, Some("DCIM/"), 7),
        ];
        let roots = build_raw(&records);
        assert_eq!(roots[0].cover.as_ref().unwrap().locator, "content://media/1");
    }

    #[test]
    fn test_duplicate_delimiters_share_nodes() {
        let records = vec![
            make_record(1, Some("DCIM/Camera/"), 1),
            make_record(2, Some("/DCIM//Camera"), 2),
        ];
        let roots = build_raw(&records);
        assert_eq!(roots.len(), 1);
        assert_eq!(find(&roots, "DCIM/Camera").item_count, 2);
    }

    #[test]
    fn test_visit_links_new_node_to_parent() {
        let mut builder = FolderTreeBuilder::new(&GalleryConfig::default());
        let record = make_record(1, Some("A/B"), 1);

        let a = builder.visit("A", "A", None, &record);
        let b = builder.visit("A/B", "B", Some(a), &record);
        let again = builder.visit("A/B", "B", Some(a), &record);
        assert_eq!(b, again);

        let (arena, _) = builder.into_parts();
        assert_eq!(arena.get(a).children, vec![b]);
        assert_eq!(arena.get(b).parent_path, "A");
        assert_eq!(arena.get(b).item_count, 2);
        assert_eq!(arena.root_ids(), vec![a]);
    }

    #[test]
    fn test_every_count_covers_direct_count() {
        let records = vec![
            make_record(1, Some("DCIM/"), 1),
            make_record(2, Some("DCIM/Camera/"), 2),
            make_record(3, Some("DCIM/Camera/"), 3),
            make_record(4, Some("Pictures/Screenshots/"), 4),
        ];
        let mut builder = FolderTreeBuilder::new(&GalleryConfig::default());
        builder.add_records(&records);
        let (arena, tracker) = builder.into_parts();

        for id in arena.ids() {
            let node = arena.get(id);
            assert!(node.item_count >= tracker.count_for(&node.path));
        }
    }

    #[test]
    fn test_build_folder_tree_applies_rewrites() {
        let records = vec![make_record(1, Some("Download/sub/"), 1)];
        let roots = build_folder_tree(&records, &GalleryConfig::default());

        let names: Vec<&str> = roots.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Download", "Movies"]);
        assert!(roots[0].children.is_empty());
    }
}
