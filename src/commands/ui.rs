use crate::models::{GalleryUiState, GalleryUiStateBuilder, ZoomAction};
use crate::state::GallerySession;

/// Replace the whole UI state
pub fn update_ui_state(session: &GallerySession, state: GalleryUiState) {
    session.ui_state.publish(state);
}

fn rebuild_ui_state(
    session: &GallerySession,
    change: impl FnOnce(GalleryUiStateBuilder) -> GalleryUiStateBuilder,
) {
    let current = session.current_ui_state();
    let next = change(GalleryUiStateBuilder::from_state(&current)).build();
    update_ui_state(session, next);
}

pub fn set_filter_not_selected_container_visible(session: &GallerySession, visible: bool) {
    rebuild_ui_state(session, |b| b.filter_not_selected_container_visible(visible));
}

pub fn set_filter_selected_container_visible(session: &GallerySession, visible: bool) {
    rebuild_ui_state(session, |b| b.filter_selected_container_visible(visible));
}

pub fn set_filter_root_visible(session: &GallerySession, visible: bool) {
    rebuild_ui_state(session, |b| b.filter_root_visible(visible));
}

pub fn set_title_container_visible(session: &GallerySession, visible: bool) {
    rebuild_ui_state(session, |b| b.title_container_visible(visible));
}

pub fn set_selection_title_root_visible(session: &GallerySession, visible: bool) {
    rebuild_ui_state(session, |b| b.selection_title_root_visible(visible));
}

/// Add a grid column
pub fn zoom_in(session: &GallerySession) {
    session.zoom_action.publish(ZoomAction::Increase);
}

/// Remove a grid column
pub fn zoom_out(session: &GallerySession) {
    session.zoom_action.publish(ZoomAction::Decrease);
}
