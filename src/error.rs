//! Error types returned by the bus and its storage.
//!
//! This module defines:
//!
//! - [`BusError`] — errors returned by every fallible [`Bus`](crate::Bus) operation.
//! - [`ArgumentError`] — the detail carried by [`BusError::InvalidArgument`].
//! - [`QueueError`] — errors of the bounded queue itself.
//!
//! None of them is fatal: every failure is a value the caller inspects and then
//! decides whether to retry, drop or log. [`BusError`] provides helper methods
//! (`as_label`, `as_message`) for logging/metrics and [`BusError::is_retryable`].

use thiserror::Error;

use crate::events::EventType;

/// Which fixed-size table an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// Per-type subscriber row.
    Subscribers,
    /// Type-agnostic observer table.
    Observers,
}

impl TableKind {
    fn as_str(self) -> &'static str {
        match self {
            TableKind::Subscribers => "subscribers",
            TableKind::Observers => "observers",
        }
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// # Invalid arguments rejected before any state changes.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentError {
    /// Event type id is not below the configured number of event types.
    #[error("event type {event_type} out of range (limit {limit})")]
    EventTypeOutOfRange {
        /// The rejected type id.
        event_type: EventType,
        /// Number of event types the bus was built with.
        limit: usize,
    },

    /// Payload is longer than the inline buffer of an event record.
    #[error("payload of {len} bytes exceeds maximum of {max}")]
    PayloadTooLarge {
        /// Length of the rejected payload.
        len: usize,
        /// Inline payload capacity.
        max: usize,
    },
}

/// # Errors returned by bus operations.
///
/// All variants are recoverable. A failed `publish` leaves the queue untouched,
/// a failed `subscribe` leaves the tables untouched.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// Operation called before [`Bus::init`](crate::Bus::init).
    #[error("bus not initialized")]
    NotInitialized,

    /// An argument was out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),

    /// No free slot left in the addressed table.
    #[error("{table} table full (limit {limit})")]
    TableFull {
        /// Table that ran out of slots.
        table: TableKind,
        /// Number of slots in that row/table.
        limit: usize,
    },

    /// No used slot matched the removal key.
    #[error("no matching entry in {table} table")]
    NotFound {
        /// Table that was searched.
        table: TableKind,
    },

    /// Queue saturated; the event was dropped.
    #[error("event queue full (capacity {capacity}); event dropped")]
    QueueFull {
        /// Queue capacity.
        capacity: usize,
    },
}

impl BusError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use slotbus::BusError;
    ///
    /// let err = BusError::QueueFull { capacity: 64 };
    /// assert_eq!(err.as_label(), "bus_queue_full");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BusError::NotInitialized => "bus_not_initialized",
            BusError::InvalidArgument(ArgumentError::EventTypeOutOfRange { .. }) => {
                "bus_event_type_out_of_range"
            }
            BusError::InvalidArgument(ArgumentError::PayloadTooLarge { .. }) => {
                "bus_payload_too_large"
            }
            BusError::TableFull { .. } => "bus_table_full",
            BusError::NotFound { .. } => "bus_not_found",
            BusError::QueueFull { .. } => "bus_queue_full",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BusError::NotInitialized => "init() has not been called".to_string(),
            BusError::InvalidArgument(err) => format!("invalid argument: {err}"),
            BusError::TableFull { table, limit } => {
                format!("no free slot in {table} (limit={limit})")
            }
            BusError::NotFound { table } => format!("no matching slot in {table}"),
            BusError::QueueFull { capacity } => {
                format!("queue saturated at {capacity} events; event dropped")
            }
        }
    }

    /// Indicates whether retrying the same call may succeed without other changes
    /// than draining the queue.
    ///
    /// Returns `true` only for [`BusError::QueueFull`].
    ///
    /// # Example
    /// ```
    /// use slotbus::BusError;
    ///
    /// assert!(BusError::QueueFull { capacity: 8 }.is_retryable());
    /// assert!(!BusError::NotInitialized.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        matches!(self, BusError::QueueFull { .. })
    }
}

/// # Errors produced by the bounded queue.
///
/// `Empty` is consumed by the drain loop and never reaches a `process` caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// `push` on a saturated queue.
    #[error("queue full")]
    Full,
    /// `pop` on an empty queue.
    #[error("queue empty")]
    Empty,
}
