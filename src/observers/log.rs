//! # LogWriter — simple event printer
//!
//! A minimal observer that prints every dispatched [`EventRecord`] to stdout.
//! Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! [event] type=1 priority=1 ts=0ms len=0
//! [event] type=2 priority=1 ts=3ms len=2 data=01 68
//! ```

use std::fmt::Write as _;

use crate::core::Bus;
use crate::error::BusError;
use crate::events::EventRecord;
use crate::subscribers::Context;

/// Stdout observer.
///
/// Enabled via the `logging` feature. Not intended for production use;
/// register your own observer for structured logging or metrics.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Observer callback; prints one line per record.
    pub fn on_event<const PAYLOAD: usize>(event: &EventRecord<PAYLOAD>, _context: Context) {
        println!("{}", Self::format(event));
    }

    /// Registers [`LogWriter::on_event`] as an observer on `bus`.
    pub fn attach<
        const TYPES: usize,
        const SUBSCRIBERS: usize,
        const OBSERVERS: usize,
        const QUEUE: usize,
        const PAYLOAD: usize,
    >(
        bus: &Bus<TYPES, SUBSCRIBERS, OBSERVERS, QUEUE, PAYLOAD>,
    ) -> Result<(), BusError> {
        bus.register_observer(Self::on_event::<PAYLOAD>, Context::NONE)
    }

    /// Removes the observer registered by [`LogWriter::attach`].
    pub fn detach<
        const TYPES: usize,
        const SUBSCRIBERS: usize,
        const OBSERVERS: usize,
        const QUEUE: usize,
        const PAYLOAD: usize,
    >(
        bus: &Bus<TYPES, SUBSCRIBERS, OBSERVERS, QUEUE, PAYLOAD>,
    ) -> Result<(), BusError> {
        bus.unregister_observer(Self::on_event::<PAYLOAD>)
    }

    fn format<const PAYLOAD: usize>(e: &EventRecord<PAYLOAD>) -> String {
        let mut line = format!(
            "[event] type={} priority={} ts={}ms len={}",
            e.event_type(),
            e.priority(),
            e.timestamp_ms(),
            e.payload_len()
        );
        if !e.payload().is_empty() {
            line.push_str(" data=");
            for (i, byte) in e.payload().iter().enumerate() {
                if i > 0 {
                    line.push(' ');
                }
                let _ = write!(line, "{byte:02X}");
            }
        }
        line
    }
}
