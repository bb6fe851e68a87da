//! Fixed-capacity hand-off channel for idle items

use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::RwLock;

/// Concurrent queue of idle items.
///
/// Pushes and pops never block. [`ReuseQueue::pop_blocking`] waits for the next
/// pushed item and returns `None` once the queue has been closed and emptied.
/// The sender sits behind a read/write lock so that no push can land after
/// [`ReuseQueue::close`] returns; the lock is never held while waiting.
pub(crate) struct ReuseQueue<T> {
    sender: RwLock<Option<Sender<T>>>,
    receiver: Receiver<T>,
}

impl<T> ReuseQueue<T> {
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = channel::bounded(capacity);
        Self {
            sender: RwLock::new(Some(sender)),
            receiver,
        }
    }

    /// Hands the item back when the queue is full or closed.
    pub fn try_push(&self, item: T) -> Result<(), T> {
        let sender = self.sender.read();
        match sender.as_ref() {
            Some(sender) => sender.try_send(item).map_err(|err| err.into_inner()),
            None => Err(item),
        }
    }

    pub fn try_pop(&self) -> Option<T> {
        self.receiver.try_recv().ok()
    }

    pub fn pop_blocking(&self) -> Option<T> {
        self.receiver.recv().ok()
    }

    /// Disconnects the channel, waking every blocked receiver.
    ///
    /// Returns `false` if the queue was already closed.
    pub fn close(&self) -> bool {
        self.sender.write().take().is_some()
    }

    /// Removes every item still queued.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_push_until_full() {
        let queue = ReuseQueue::new(2);
        assert!(queue.try_push(1).is_ok());
        assert!(queue.try_push(2).is_ok());
        assert_eq!(queue.try_push(3), Err(3));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_pop_empty_does_not_block() {
        let queue = ReuseQueue::<u32>::new(4);
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn test_push_after_close_is_rejected() {
        let queue = ReuseQueue::new(4);
        assert!(queue.close());
        assert!(!queue.close());
        assert_eq!(queue.try_push(9), Err(9));
    }

    #[test]
    fn test_drain_after_close() {
        let queue = ReuseQueue::new(4);
        queue.try_push("x").unwrap();
        queue.try_push("y").unwrap();
        queue.close();

        let mut drained = queue.drain();
        drained.sort();
        assert_eq!(drained, vec!["x", "y"]);
        assert_eq!(queue.pop_blocking(), None);
    }

    #[test]
    fn test_close_wakes_blocked_receiver() {
        let queue = Arc::new(ReuseQueue::<u32>::new(1));
        let waiter = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop_blocking())
        };

        thread::sleep(Duration::from_millis(50));
        queue.close();
        assert_eq!(waiter.join().unwrap(), None);
    }

    #[test]
    fn test_blocked_receiver_gets_pushed_item() {
        let queue = Arc::new(ReuseQueue::<u32>::new(1));
        let waiter = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pop_blocking())
        };

        thread::sleep(Duration::from_millis(50));
        queue.try_push(42).unwrap();
        assert_eq!(waiter.join().unwrap(), Some(42));
    }
}
