//! Result delivery
//!
//! Two sink disciplines, kept as separate types since consumers expect
//! different drop and replay behavior:
//! - [`LatestValue`]: one slot holding the newest value. An unconsumed
//!   value is silently replaced by the next publish.
//! - [`Broadcast`]: every publish reaches every current subscriber.
//!   Subscribers joining later see nothing published before they joined.

mod broadcast;
mod latest;

pub use broadcast::Broadcast;
pub use latest::LatestValue;
