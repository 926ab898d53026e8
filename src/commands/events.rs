use crate::models::PageEvent;
use crate::state::GallerySession;

/// Relay a host action (toolbar click, select-all, ...) to the pages
pub fn send_parent_event(session: &GallerySession, event: PageEvent) {
    log::debug!("Parent event: {}", event.action);
    session.parent_events.publish(event);
}

/// Relay a page request to the host. Returns how many observers got it.
pub fn send_child_event(session: &GallerySession, event: PageEvent) -> usize {
    log::debug!("Child event: {}", event.action);
    session.child_events.publish(event)
}

/// Hand an activity result from the host to the page that launched it
pub fn send_activity_result(session: &GallerySession, event: PageEvent) {
    log::debug!("Activity result: {}", event.action);
    session.activity_results.publish(event);
}
