//! # Event records carried through the bus.
//!
//! An [`EventRecord`] describes one occurrence: its type id, a priority byte,
//! the millisecond timestamp sampled when it was published and a small inline
//! payload. Records are plain `Copy` values; the queue stores them by value and
//! callbacks receive a shared reference that is only valid for the call.
//!
//! ## Example
//! ```rust
//! use slotbus::EventRecord;
//!
//! let ev: EventRecord = EventRecord::new(3, 1, 250, &[0x01, 0x68]).unwrap();
//!
//! assert_eq!(ev.event_type(), 3);
//! assert_eq!(ev.priority(), 1);
//! assert_eq!(ev.timestamp_ms(), 250);
//! assert_eq!(ev.payload(), &[0x01, 0x68]);
//! ```

use std::fmt;

use crate::config::MAX_PAYLOAD_BYTES;
use crate::error::ArgumentError;

/// Event type id. Valid ids are `0..TYPES` of the bus they are published on.
pub type EventType = u16;

/// Priority byte. Stored and forwarded, never interpreted by the bus.
pub type Priority = u8;

/// One published occurrence with an inline payload of at most `PAYLOAD` bytes.
///
/// - `event_type`: category id
/// - `priority`: opaque to the bus (no reordering, no filtering)
/// - `timestamp_ms`: assigned at publish time, milliseconds since `init`
/// - `payload`: the first `payload_len` bytes are meaningful
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EventRecord<const PAYLOAD: usize = MAX_PAYLOAD_BYTES> {
    event_type: EventType,
    priority: Priority,
    timestamp_ms: u32,
    payload_len: u8,
    payload: [u8; PAYLOAD],
}

impl<const PAYLOAD: usize> EventRecord<PAYLOAD> {
    /// Zeroed record used to fill unused queue slots.
    pub(crate) const EMPTY: Self = Self {
        event_type: 0,
        priority: 0,
        timestamp_ms: 0,
        payload_len: 0,
        payload: [0; PAYLOAD],
    };

    /// Builds a record, copying `data` into the inline buffer.
    ///
    /// Fails with [`ArgumentError::PayloadTooLarge`] when `data` does not fit.
    /// The type id is not range-checked here; the bus checks it against its own limit.
    pub fn new(
        event_type: EventType,
        priority: Priority,
        timestamp_ms: u32,
        data: &[u8],
    ) -> Result<Self, ArgumentError> {
        if data.len() > PAYLOAD || data.len() > usize::from(u8::MAX) {
            return Err(ArgumentError::PayloadTooLarge {
                len: data.len(),
                max: PAYLOAD,
            });
        }

        let mut record = Self::EMPTY;
        record.event_type = event_type;
        record.priority = priority;
        record.timestamp_ms = timestamp_ms;
        record.payload[..data.len()].copy_from_slice(data);
        record.payload_len = data.len() as u8;
        Ok(record)
    }

    /// Event category id.
    #[inline]
    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Priority byte as given to `publish`.
    #[inline]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Milliseconds since the bus was initialized, wrapping at `u32::MAX`.
    #[inline]
    pub fn timestamp_ms(&self) -> u32 {
        self.timestamp_ms
    }

    /// Meaningful payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload[..usize::from(self.payload_len)]
    }

    #[inline]
    pub fn payload_len(&self) -> u8 {
        self.payload_len
    }

    /// Inline buffer size of this record type.
    #[inline]
    pub const fn payload_capacity() -> usize {
        PAYLOAD
    }
}

impl<const PAYLOAD: usize> fmt::Debug for EventRecord<PAYLOAD> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRecord")
            .field("event_type", &self.event_type)
            .field("priority", &self.priority)
            .field("timestamp_ms", &self.timestamp_ms)
            .field("payload", &self.payload())
            .finish()
    }
}
