use std::sync::{Condvar, Mutex};
use std::time::Duration;

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    /// Number of publishes so far
    version: u64,
    /// Set by publish, cleared by take
    fresh: bool,
}

/// Single-slot sink holding the most recently published value
#[derive(Debug)]
pub struct LatestValue<T> {
    slot: Mutex<Slot<T>>,
    ready: Condvar,
}

impl<T: Clone> LatestValue<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                value: None,
                version: 0,
                fresh: false,
            }),
            ready: Condvar::new(),
        }
    }

    /// Start with a readable value that does not count as a publish
    pub fn with_initial(value: T) -> Self {
        Self {
            slot: Mutex::new(Slot {
                value: Some(value),
                version: 0,
                fresh: false,
            }),
            ready: Condvar::new(),
        }
    }

    /// Replace the held value, consumed or not
    pub fn publish(&self, value: T) {
        if let Ok(mut slot) = self.slot.lock() {
            slot.value = Some(value);
            slot.version += 1;
            slot.fresh = true;
            self.ready.notify_all();
        }
    }

    /// Current value without consuming it
    pub fn get(&self) -> Option<T> {
        self.slot.lock().ok().and_then(|slot| slot.value.clone())
    }

    /// The value published since the last take, if any
    pub fn take(&self) -> Option<T> {
        let mut slot = self.slot.lock().ok()?;
        if !slot.fresh {
            return None;
        }
        slot.fresh = false;
        slot.value.clone()
    }

    /// Like [`take`](Self::take) but waits up to `timeout` for a publish
    pub fn wait_take(&self, timeout: Duration) -> Option<T> {
        let slot = self.slot.lock().ok()?;
        let (mut slot, _) = self
            .ready
            .wait_timeout_while(slot, timeout, |slot| !slot.fresh)
            .ok()?;
        if !slot.fresh {
            return None;
        }
        slot.fresh = false;
        slot.value.clone()
    }

    /// Publish counter; consumers can compare it to discard stale values
    pub fn version(&self) -> u64 {
        self.slot.lock().map(|slot| slot.version).unwrap_or(0)
    }
}

impl<T: Clone> Default for LatestValue<T> {
    fn default() -> Self {
        Self::new()
    }
}
