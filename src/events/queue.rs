//! # Bounded FIFO queue of event records.
//!
//! [`BoundedQueue`] is a fixed-capacity ring buffer. It never grows and never
//! overwrites: a `push` against a full queue is rejected and the record is
//! handed back to the caller as an error.
//!
//! ## Layout
//! ```text
//!            head            tail
//!              ▼               ▼
//!   ┌────┬────┬────┬────┬────┬────┬────┬────┐
//!   │    │    │ e1 │ e2 │ e3 │    │    │    │   count = 3
//!   └────┴────┴────┴────┴────┴────┴────┴────┘
//!   tail == (head + count) % CAP
//! ```
//!
//! ## Rules
//! - Strict FIFO; the priority byte is ignored.
//! - `pop` returns the record **by value**, so no caller ever holds a reference
//!   into a slot that a later `push` may overwrite.
//! - `reset` only rewinds the indices; stale records stay in place, hidden by `count`.

use crate::error::QueueError;

use super::event::EventRecord;

/// Fixed-capacity circular buffer of [`EventRecord`]s.
pub struct BoundedQueue<const CAP: usize, const PAYLOAD: usize> {
    slots: [EventRecord<PAYLOAD>; CAP],
    head: usize,
    tail: usize,
    count: usize,
}

impl<const CAP: usize, const PAYLOAD: usize> BoundedQueue<CAP, PAYLOAD> {
    const NON_EMPTY: () = assert!(CAP > 0, "queue capacity must be at least 1");

    /// Creates an empty queue.
    pub const fn new() -> Self {
        let () = Self::NON_EMPTY;
        Self {
            slots: [EventRecord::EMPTY; CAP],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Appends a record at the tail.
    ///
    /// Fails with [`QueueError::Full`] when `count == CAP`; nothing is written then.
    pub fn push(&mut self, record: EventRecord<PAYLOAD>) -> Result<(), QueueError> {
        if self.count == CAP {
            return Err(QueueError::Full);
        }
        self.slots[self.tail] = record;
        self.tail = (self.tail + 1) % CAP;
        self.count += 1;
        Ok(())
    }

    /// Removes and returns the record at the head.
    ///
    /// Fails with [`QueueError::Empty`] when there is nothing to pop.
    pub fn pop(&mut self) -> Result<EventRecord<PAYLOAD>, QueueError> {
        if self.count == 0 {
            return Err(QueueError::Empty);
        }
        let record = self.slots[self.head];
        self.head = (self.head + 1) % CAP;
        self.count -= 1;
        Ok(record)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of queued records.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        CAP
    }

    /// Drops every queued record.
    pub fn reset(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }
}

impl<const CAP: usize, const PAYLOAD: usize> Default for BoundedQueue<CAP, PAYLOAD> {
    fn default() -> Self {
        Self::new()
    }
}
