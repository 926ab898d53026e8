//! Background processing
//!
//! Album loads run off the caller's thread on one serial worker so the
//! host stays responsive and loads never overlap.

mod load_queue;

pub use load_queue::{LoadQueue, LoadQueueStatus};
