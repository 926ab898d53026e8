use std::sync::Arc;

use rayon::prelude::*;

use crate::models::MediaItem;
use crate::source::MediaSource;
use crate::state::GallerySession;

/// Items of exactly `bucket_id`, newest capture first.
///
/// Items with equal capture times keep the source's order.
pub fn list_bucket_items(source: &dyn MediaSource, bucket_id: &str) -> Vec<MediaItem> {
    if bucket_id.is_empty() {
        return Vec::new();
    }

    let mut items: Vec<MediaItem> = source
        .bucket_items(bucket_id)
        .into_par_iter()
        .filter(|item| item.bucket_id == bucket_id)
        .collect();
    items.par_sort_by(|a, b| b.captured_at.cmp(&a.captured_at));
    items
}

/// Load every image and video of one bucket into `media_items`
pub fn load_media_items(
    session: &GallerySession,
    source: Option<Arc<dyn MediaSource>>,
    bucket_id: Option<&str>,
) {
    let (Some(source), Some(bucket_id)) = (source, bucket_id.filter(|id| !id.is_empty())) else {
        log::warn!("Missing source or bucket id, publishing empty item list");
        session.media_items.publish(Vec::new());
        return;
    };

    let sink = Arc::clone(&session.media_items);
    let bucket_id = bucket_id.to_string();

    let submitted = session.queue.submit(move || {
        let items = list_bucket_items(source.as_ref(), &bucket_id);
        log::info!("Bucket {}: {} items", bucket_id, items.len());
        sink.publish(items);
    });

    if let Err(e) = submitted {
        log::warn!("Media item load dropped: {}", e);
        session.media_items.publish(Vec::new());
    }
}
