use std::sync::Arc;

use crate::folders::{aggregate_buckets, build_album_tree, select_special_folders};
use crate::source::MediaSource;
use crate::state::GallerySession;

/// Build the multi-level album tree and publish it to `album_folders`
///
/// Publishes a one-element list holding the "All" node, or an empty list
/// when there is no source.
pub fn load_album_folders(session: &GallerySession, source: Option<Arc<dyn MediaSource>>) {
    let Some(source) = source else {
        log::warn!("No media source, publishing empty album tree");
        session.album_folders.publish(Vec::new());
        return;
    };

    let sink = Arc::clone(&session.album_folders);
    let config = Arc::clone(&session.config);

    let submitted = session.queue.submit(move || {
        let records = source.records();
        let all = build_album_tree(&records, &config);
        log::info!(
            "Album folders: {} records, {} items in {} nodes",
            records.len(),
            all.item_count,
            all.node_count()
        );
        sink.publish(vec![all]);
    });

    if let Err(e) = submitted {
        log::warn!("Album folder load dropped: {}", e);
        session.album_folders.publish(Vec::new());
    }
}

/// Aggregate per bucket and publish the Camera/Movies/Download/Pictures
/// buckets to `special_folders`
pub fn load_special_folders(session: &GallerySession, source: Option<Arc<dyn MediaSource>>) {
    let Some(source) = source else {
        log::warn!("No media source, publishing empty special folders");
        session.special_folders.publish(Vec::new());
        return;
    };

    let sink = Arc::clone(&session.special_folders);
    let delimiter = session.config.path_delimiter;

    let submitted = session.queue.submit(move || {
        let records = source.records();
        let buckets = aggregate_buckets(&records, delimiter);
        let bucket_count = buckets.len();
        let special = select_special_folders(buckets);
        log::info!(
            "Special folders: {} of {} buckets selected",
            special.len(),
            bucket_count
        );
        sink.publish(special);
    });

    if let Err(e) = submitted {
        log::warn!("Special folder load dropped: {}", e);
        session.special_folders.publish(Vec::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init_test_logging;
    use crate::models::{FolderNode, MediaItem, RootKind};
    use crate::source::fixtures::make_item;
    use crate::source::InMemoryMediaSource;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(5);

    fn source(items: Vec<MediaItem>) -> Option<Arc<dyn MediaSource>> {
        Some(Arc::new(InMemoryMediaSource::new(items)))
    }

    fn collect_paths(node: &FolderNode, out: &mut Vec<String>) {
        out.push(node.path.clone());
        for child in &node.children {
            collect_paths(child, out);
        }
    }

    #[test]
    fn test_load_album_folders_publishes_all_node() {
        init_test_logging();
        let session = GallerySession::default();
        let rx = session.album_folders.subscribe();

        load_album_folders(
            &session,
            source(vec![
                make_item(1, "cam", "DCIM/Camera/", 5, false),
                make_item(2, "x", "DCIM/Camera/x/", 9, true),
                make_item(3, "dcim", "DCIM/", 3, false),
                make_item(4, "dl", "Download/sub/", 1, false),
            ]),
        );

        let published = rx.recv_timeout(WAIT).unwrap();
        assert_eq!(published.len(), 1);

        let all = &published[0];
        assert_eq!(all.root_kind, RootKind::All);
        assert_eq!(all.item_count, 4);

        let roots: Vec<&str> = all.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(roots, vec!["DCIM", "Download", "Movies"]);
        // Cover of the first root in name order
        assert_eq!(all.cover.as_ref().unwrap().locator, "content://media/2");

        let mut paths = Vec::new();
        collect_paths(all, &mut paths);
        assert!(paths.contains(&"DCIM_CHILD".to_string()));
        assert!(paths.contains(&"DCIM/Camera_CHILD".to_string()));
        assert!(!paths.iter().any(|p| p.starts_with("Download/")));
    }

    #[test]
    fn test_missing_source_publishes_empty_tree() {
        let session = GallerySession::default();
        let rx = session.album_folders.subscribe();

        load_album_folders(&session, None);

        assert!(rx.recv_timeout(WAIT).unwrap().is_empty());
        assert_eq!(session.queue.status().total, 0);
    }

    #[test]
    fn test_every_load_publishes_in_order() {
        let session = GallerySession::default();
        let rx = session.album_folders.subscribe();

        load_album_folders(&session, source(vec![make_item(1, "a", "A/", 1, false)]));
        load_album_folders(
            &session,
            source(vec![
                make_item(1, "a", "A/", 1, false),
                make_item(2, "b", "B/", 2, false),
            ]),
        );

        let first = rx.recv_timeout(WAIT).unwrap();
        let second = rx.recv_timeout(WAIT).unwrap();
        assert_eq!(first[0].item_count, 1);
        assert_eq!(second[0].item_count, 2);
    }

    #[test]
    fn test_load_special_folders_orders_by_kind() {
        init_test_logging();
        let session = GallerySession::default();
        let rx = session.special_folders.subscribe();

        load_special_folders(
            &session,
            source(vec![
                make_item(1, "pics", "Pictures/y/", 1, false),
                make_item(2, "movies", "MyMoviesArchive/z/", 2, true),
                make_item(3, "cam", "Camera/x/", 3, false),
                make_item(4, "music", "Music/", 4, false),
            ]),
        );

        let special = rx.recv_timeout(WAIT).unwrap();
        let kinds: Vec<RootKind> = special.iter().map(|f| f.root_kind).collect();
        assert_eq!(kinds, vec![RootKind::Camera, RootKind::Movies, RootKind::Pictures]);
    }

    #[test]
    fn test_closed_queue_publishes_empty_results() {
        let session = GallerySession::default();
        let albums = session.album_folders.subscribe();
        let special = session.special_folders.subscribe();
        session.queue.shutdown();

        let items = vec![make_item(1, "cam", "DCIM/Camera/", 1, false)];
        load_album_folders(&session, source(items.clone()));
        load_special_folders(&session, source(items));

        assert!(albums.recv_timeout(WAIT).unwrap().is_empty());
        assert!(special.recv_timeout(WAIT).unwrap().is_empty());
    }

    #[test]
    fn test_missing_source_publishes_empty_special_folders() {
        let session = GallerySession::default();
        let rx = session.special_folders.subscribe();

        load_special_folders(&session, None);

        assert!(rx.recv_timeout(WAIT).unwrap().is_empty());
    }
}
