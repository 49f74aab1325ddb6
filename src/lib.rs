//! # slotbus
//!
//! **slotbus** is a fixed-capacity, allocation-free publish/subscribe event bus
//! for single-threaded programs (cooperative schedulers, event loops, small
//! PC-hosted tools).
//!
//! Producers publish typed events with a small inline payload; the bus buffers
//! them in a bounded FIFO queue and later dispatches each one, synchronously,
//! to the subscribers of its type and to every global observer.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   producer A        producer B        callback (re-entrant)
//!       │                 │                  │
//!       └──── publish(type, priority, data) ─┘
//!                         ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Bus                                                              │
//! │  - BoundedQueue     (QUEUE records, FIFO, rejects when full)      │
//! │  - SubscriberTable  (TYPES rows × SUBSCRIBERS slots)              │
//! │  - ObserverTable    (OBSERVERS slots, every type)                 │
//! └────────────────────────────────┬──────────────────────────────────┘
//!                                  │ process(): drain until empty
//!                                  ▼
//!                     ┌────────────────────────┐
//!                     │ dispatch(record)       │
//!                     └───┬────────────────┬───┘
//!                         ▼                ▼
//!               subscribers[type]     observers
//!               (slot 0, 1, ...)      (slot 0, 1, ...)
//! ```
//!
//! ### Lifecycle
//! ```text
//! Bus::new() ──► Uninitialized ──init()──► Ready
//!
//! Ready:
//!   ├─► subscribe / unsubscribe      (per-type rows, lowest free slot)
//!   ├─► register / unregister observer
//!   ├─► publish  ─► QueueFull? drop : enqueue (timestamp sampled here)
//!   ├─► process  ─► pop ─► subscribers[type] ─► observers ─► repeat until empty
//!   ├─► clear_queue (tables untouched)
//!   └─► init     (re-zero everything)
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types                          |
//! |-------------------|---------------------------------------------------------------|------------------------------------|
//! | **Bus**           | Publish, buffer and dispatch events.                          | [`Bus`]                            |
//! | **Events**        | Timestamped records with inline payload.                      | [`EventRecord`], [`EventType`]     |
//! | **Callbacks**     | Plain function pointers with an opaque context token.         | [`Callback`], [`Context`]          |
//! | **Errors**        | Typed, non-fatal errors.                                      | [`BusError`], [`ArgumentError`]    |
//! | **Configuration** | Compile-time limits as const generic defaults.                | [`config`], [`Limits`]             |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] observer _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use slotbus::{Bus, Context, EventRecord};
//!
//! const BUTTON: u16 = 1;
//!
//! fn on_button(ev: &EventRecord, ctx: Context) {
//!     println!("button #{} pressed at {}ms", ctx.get(), ev.timestamp_ms());
//! }
//!
//! fn audit(ev: &EventRecord, _ctx: Context) {
//!     println!("type={} len={}", ev.event_type(), ev.payload_len());
//! }
//!
//! let bus: Bus = Bus::ready();
//! bus.subscribe(BUTTON, on_button, Context::new(3))?;
//! bus.register_observer(audit, Context::NONE)?;
//!
//! bus.publish(BUTTON, 2, &[])?;
//! assert_eq!(bus.process()?, 1);
//! # Ok::<(), slotbus::BusError>(())
//! ```

pub mod config;
mod core;
mod error;
mod events;
mod observers;
mod subscribers;

// ---- Public re-exports ----

pub use config::Limits;
pub use crate::core::Bus;
pub use error::{ArgumentError, BusError, QueueError, TableKind};
pub use events::{BoundedQueue, EventRecord, EventType, Priority};
pub use subscribers::{Callback, Context};

// Optional: expose a simple built-in logger observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogWriter;
