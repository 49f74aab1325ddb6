//! # Observers: type-agnostic event handlers
//!
//! An observer is a [`Callback`](crate::Callback) that receives **every**
//! dispatched record, after the per-type subscribers of that record ran.
//!
//! ```text
//!   Bus::process ──► pop(EventRecord)
//!                        ├─► subscribers of record.type
//!                        └─► observer 0 ─► observer 1 ─► ... (slot order)
//! ```
//!
//! #### Note:
//! A simple [`LogWriter`] is available (enabled via the `logging` feature), useful for debug and demos.

#[cfg(feature = "logging")]
mod log;
mod table;

#[cfg(feature = "logging")]
pub use log::LogWriter;

pub(crate) use table::ObserverTable;
