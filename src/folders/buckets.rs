use rustc_hash::FxHashMap;

use super::folder_key;
use crate::models::{FolderNode, MediaCover, MediaRecord, RootKind};

/// One flat node per distinct bucket id, in first-seen order.
///
/// The node path is the first record's relative path without its trailing
/// delimiter; records without a path leave it empty.
pub fn aggregate_buckets(records: &[MediaRecord], delimiter: char) -> Vec<FolderNode> {
    let mut buckets: Vec<FolderNode> = Vec::new();
    let mut by_id: FxHashMap<&str, usize> = FxHashMap::default();

    for record in records {
        match by_id.get(record.bucket_id.as_str()) {
            Some(&index) => {
                let bucket = &mut buckets[index];
                bucket.item_count += 1;
                if bucket.cover.as_ref().map_or(true, |c| c.is_older_than(record)) {
                    bucket.cover = Some(MediaCover::from_record(record));
                }
            }
            None => {
                by_id.insert(record.bucket_id.as_str(), buckets.len());
                buckets.push(FolderNode {
                    bucket_id: record.bucket_id.clone(),
                    name: record.bucket_name.clone().unwrap_or_default(),
                    path: record
                        .relative_path
                        .as_deref()
                        .map(|p| folder_key(p, delimiter).to_string())
                        .unwrap_or_default(),
                    item_count: 1,
                    cover: Some(MediaCover::from_record(record)),
                    ..Default::default()
                });
            }
        }
    }

    buckets
}

/// Pick the well-known buckets and tag them with their kind
pub fn select_special_folders(buckets: Vec<FolderNode>) -> Vec<FolderNode> {
    SpecialFoldersSelector.select(buckets)
}

/// Surfaces Camera, Movies, Download and Pictures buckets in that order.
///
/// Matching is substring containment on the bucket path, so
/// `MyMoviesArchive` counts as Movies.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpecialFoldersSelector;

impl SpecialFoldersSelector {
    pub fn select(&self, buckets: Vec<FolderNode>) -> Vec<FolderNode> {
        let mut selected: Vec<FolderNode> = buckets
            .into_iter()
            .filter_map(|mut bucket| {
                let kind = RootKind::classify(&bucket.path)?;
                bucket.root_kind = kind;
                Some(bucket)
            })
            .collect();

        // Stable: buckets of the same kind keep first-seen order
        selected.sort_by_key(|bucket| bucket.root_kind);
        selected
    }
}
