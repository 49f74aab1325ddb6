//! # Subscription storage.
//!
//! Callbacks are stored in fixed rows of slots; nothing here allocates.
//!
//! ## Architecture
//! ```text
//! Bus::process()
//!    └─► pop EventRecord (type = T)
//!          ├──► SubscriberTable row T  ─► slot 0, slot 1, ... (used slots only)
//!          └──► ObserverTable          ─► slot 0, slot 1, ... (every type)
//! ```
//!
//! - [`Callback`] plain function pointer `fn(&EventRecord, Context)`
//! - [`Context`] opaque token handed back to the callback
//! - `SubscriberTable` one row per event type, identity = `(callback, context)`
//!
//! The observer table lives in [`crate::observers`] and reuses the same slot row.

mod slot;
mod table;

pub use slot::{Callback, Context};

pub(crate) use slot::{Entry, SlotRow};
pub(crate) use table::SubscriberTable;
