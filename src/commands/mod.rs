//! Session entry points
//!
//! Every load is a one-shot pipeline (snapshot, build, publish) queued on
//! the session's serial worker. Split into submodules by output stream.

mod events;
mod folders;
mod items;
mod ui;

pub use events::*;
pub use folders::*;
pub use items::*;
pub use ui::*;

#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
