//! FIFO buffer of toasts waiting for the current one to finish.

use std::collections::VecDeque;

use crate::toast::ToastRequest;

/// Pending toast requests in arrival order.
///
/// Owned by the coordinator; no locking.
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: VecDeque<ToastRequest>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the tail.
    pub fn enqueue(&mut self, request: ToastRequest) {
        self.pending.push_back(request);
    }

    /// Remove and return the head.
    pub fn dequeue(&mut self) -> Option<ToastRequest> {
        self.pending.pop_front()
    }

    /// Drop every pending request. Their callbacks never run.
    ///
    /// Returns the number of requests removed.
    pub fn clear(&mut self) -> usize {
        let cleared = self.pending.len();
        self.pending.clear();
        cleared
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
