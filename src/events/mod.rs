//! Event data model and the bounded queue that buffers it.
//!
//! ## Contents
//! - [`EventRecord`] one published occurrence with inline payload
//! - [`EventType`], [`Priority`] the scalar fields a publisher chooses
//! - [`BoundedQueue`] fixed-capacity FIFO ring of records
//!
//! ## Quick reference
//! - **Producer**: `Bus::publish` builds a record and pushes it.
//! - **Consumer**: `Bus::process` pops records one at a time and dispatches them.

mod event;
mod queue;

pub use event::{EventRecord, EventType, Priority};
pub use queue::BoundedQueue;
