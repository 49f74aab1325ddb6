//! # Compile-time limits.
//!
//! Default sizes for every fixed table and buffer. They are the defaults of the
//! const generic parameters of [`Bus`](crate::Bus) and
//! [`EventRecord`](crate::EventRecord); pick other values by naming the
//! parameters explicitly:
//!
//! ```rust
//! use slotbus::Bus;
//!
//! // 4 event types, 2 subscribers per type, 1 observer, 16 queued events, 8 payload bytes.
//! let bus: Bus<4, 2, 1, 16, 8> = Bus::ready();
//! assert_eq!(bus.capacity(), 16);
//! ```
//!
//! ## Bounds
//! Checked at compile time when a bus is instantiated:
//! - `QUEUE` in `1..=65535` (occupancy is reported as `u16`)
//! - `PAYLOAD <= 255` (payload length is stored as `u8`)
//! - `TYPES <= 65536` (type ids are `u16`)
//! - `SUBSCRIBERS`, `OBSERVERS` and `TYPES` non-zero

/// Number of distinct event types; valid ids are `0..MAX_EVENT_TYPES`.
pub const MAX_EVENT_TYPES: usize = 32;

/// Subscriber slots per event type.
pub const MAX_SUBSCRIBERS_PER_TYPE: usize = 8;

/// Global observer slots.
pub const MAX_OBSERVERS: usize = 4;

/// Queue depth.
pub const QUEUE_CAPACITY: usize = 64;

/// Inline payload bytes per event.
pub const MAX_PAYLOAD_BYTES: usize = 32;

/// Limits a particular bus instance was built with.
///
/// Returned by [`Bus::limits`](crate::Bus::limits); handy for logging the
/// configuration at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Number of event types.
    pub event_types: usize,
    /// Subscriber slots per event type.
    pub subscribers_per_type: usize,
    /// Observer slots.
    pub observers: usize,
    /// Queue depth.
    pub queue_capacity: usize,
    /// Inline payload bytes.
    pub payload_bytes: usize,
}

impl Default for Limits {
    /// Limits of a `Bus` with all parameters left at their defaults.
    fn default() -> Self {
        Self {
            event_types: MAX_EVENT_TYPES,
            subscribers_per_type: MAX_SUBSCRIBERS_PER_TYPE,
            observers: MAX_OBSERVERS,
            queue_capacity: QUEUE_CAPACITY,
            payload_bytes: MAX_PAYLOAD_BYTES,
        }
    }
}
