//! Work deferred past the current event turn.
//!
//! A drag release and the click the platform synthesizes for it arrive in
//! the same turn. Cleanup that must outlive that click is queued here and
//! runs when the host ends the turn, after every same-turn event has been
//! dispatched.

use std::collections::VecDeque;

/// FIFO of tasks to run once the current turn completes.
#[derive(Debug, Clone)]
pub struct TurnQueue<T> {
    pending: VecDeque<T>,
}

impl<T> Default for TurnQueue<T> {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }
}

impl<T> TurnQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a task for the end of the current turn.
    pub fn defer(&mut self, task: T) {
        self.pending.push_back(task);
    }

    /// Take every queued task, in the order it was deferred.
    ///
    /// Tasks deferred while the drained ones run belong to the next turn.
    pub fn drain(&mut self) -> Vec<T> {
        self.pending.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_fifo_order() {
        let mut queue = TurnQueue::new();
        queue.defer(1);
        queue.defer(2);
        assert_eq!(queue.drain(), vec![1, 2]);
        assert!(queue.drain().is_empty());
    }
}
