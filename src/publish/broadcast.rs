use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

/// Sink delivering every publish to every live subscriber. No replay.
#[derive(Debug)]
pub struct Broadcast<T> {
    subscribers: Mutex<Vec<Sender<T>>>,
}

impl<T: Clone + Send> Broadcast<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Receive every value published from now on
    pub fn subscribe(&self) -> Receiver<T> {
        let (tx, rx) = channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }

    /// Deliver `value` to each subscriber, dropping the ones that hung up.
    /// Returns how many received it.
    pub fn publish(&self, value: T) -> usize {
        let Ok(mut subscribers) = self.subscribers.lock() else {
            return 0;
        };
        subscribers.retain(|tx| tx.send(value.clone()).is_ok());
        subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl<T: Clone + Send> Default for Broadcast<T> {
    fn default() -> Self {
        Self::new()
    }
}
