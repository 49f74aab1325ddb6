//! # Bus facade: publish, buffer, dispatch.
//!
//! [`Bus`] owns one [`BoundedQueue`], one subscriber table and one observer
//! table, all sized by const generic parameters. Nothing is allocated after
//! construction.
//!
//! ## Architecture
//! ```text
//! publish(type, prio, data)              process()
//!      │                                    │
//!      ▼                                    ▼
//!  EventRecord ──push──► [BoundedQueue] ──pop──► dispatch(record)
//!  (timestamped)          (FIFO, fixed)            ├─► subscribers[type] (slot order)
//!                                                  └─► observers         (slot order)
//! ```
//!
//! ## State machine
//! ```text
//!   Bus::new() ──► Uninitialized ──init()──► Ready ──init()──► Ready (re-zeroed)
//! ```
//! Every operation except `init` fails with [`BusError::NotInitialized`] while
//! uninitialized; `get_count` reports 0.
//!
//! ## Re-entrancy
//! All methods take `&self`. Callbacks run synchronously inside `process` and
//! may call back into the same bus (publish, subscribe, unsubscribe, observer
//! registration, clear, init). No table is borrowed while a callback runs, and
//! every slot is read at the moment it is visited:
//! - a slot freed by a callback before it is reached is skipped;
//! - a slot claimed by a callback at a later index is invoked in the same pass;
//! - events published by callbacks are drained by the same `process` call.
//!
//! `Bus` is `!Sync`; share it across threads only behind your own lock.

use std::cell::{Cell, RefCell};
use std::time::Instant;

use tracing::{debug, warn};

use crate::config::{
    Limits, MAX_EVENT_TYPES, MAX_OBSERVERS, MAX_PAYLOAD_BYTES, MAX_SUBSCRIBERS_PER_TYPE,
    QUEUE_CAPACITY,
};
use crate::error::{ArgumentError, BusError};
use crate::events::{BoundedQueue, EventRecord, EventType, Priority};
use crate::observers::ObserverTable;
use crate::subscribers::{Callback, Context, SubscriberTable};

/// Fixed-capacity publish/subscribe event bus.
///
/// ### Parameters
/// - `TYPES`: number of event types (`0..TYPES` are valid ids)
/// - `SUBSCRIBERS`: subscriber slots per event type
/// - `OBSERVERS`: global observer slots
/// - `QUEUE`: queue depth
/// - `PAYLOAD`: inline payload bytes per event
///
/// # Example
/// ```rust
/// use slotbus::{Bus, Context, EventRecord};
///
/// fn on_sensor(ev: &EventRecord, _ctx: Context) {
///     assert_eq!(ev.payload(), &[0x01, 0x68]);
/// }
///
/// let bus: Bus = Bus::new();
/// bus.init().unwrap();
/// bus.subscribe(2, on_sensor, Context::NONE).unwrap();
/// bus.publish(2, 1, &[0x01, 0x68]).unwrap();
/// assert_eq!(bus.get_count(), 1);
/// assert_eq!(bus.process(), Ok(1));
/// assert_eq!(bus.get_count(), 0);
/// ```
pub struct Bus<
    const TYPES: usize = MAX_EVENT_TYPES,
    const SUBSCRIBERS: usize = MAX_SUBSCRIBERS_PER_TYPE,
    const OBSERVERS: usize = MAX_OBSERVERS,
    const QUEUE: usize = QUEUE_CAPACITY,
    const PAYLOAD: usize = MAX_PAYLOAD_BYTES,
> {
    initialized: Cell<bool>,
    epoch: Cell<Option<Instant>>,
    queue: RefCell<BoundedQueue<QUEUE, PAYLOAD>>,
    subscribers: RefCell<SubscriberTable<TYPES, SUBSCRIBERS, PAYLOAD>>,
    observers: RefCell<ObserverTable<OBSERVERS, PAYLOAD>>,
}

impl<
    const TYPES: usize,
    const SUBSCRIBERS: usize,
    const OBSERVERS: usize,
    const QUEUE: usize,
    const PAYLOAD: usize,
> Bus<TYPES, SUBSCRIBERS, OBSERVERS, QUEUE, PAYLOAD>
{
    const VALID_LIMITS: () = {
        assert!(TYPES > 0, "at least one event type is required");
        assert!(
            TYPES <= EventType::MAX as usize + 1,
            "event type ids are u16"
        );
        assert!(SUBSCRIBERS > 0, "subscriber rows need at least one slot");
        assert!(OBSERVERS > 0, "observer table needs at least one slot");
        assert!(
            QUEUE > 0 && QUEUE <= u16::MAX as usize,
            "queue capacity must be in 1..=65535"
        );
        assert!(PAYLOAD <= u8::MAX as usize, "payload length is stored as u8");
    };

    /// Creates an **uninitialized** bus.
    ///
    /// `const` so it can back a `static` or `thread_local!`. Call [`Bus::init`]
    /// before use, or construct with [`Bus::ready`].
    pub const fn new() -> Self {
        let () = Self::VALID_LIMITS;
        Self {
            initialized: Cell::new(false),
            epoch: Cell::new(None),
            queue: RefCell::new(BoundedQueue::new()),
            subscribers: RefCell::new(SubscriberTable::new()),
            observers: RefCell::new(ObserverTable::new()),
        }
    }

    /// Creates a bus and initializes it.
    pub fn ready() -> Self {
        let bus = Self::new();
        bus.reset_all();
        bus
    }

    /// Moves the bus to `Ready`, emptying the queue and both tables.
    ///
    /// Idempotent: calling it again re-zeros everything and restarts the
    /// timestamp clock. Never fails.
    pub fn init(&self) -> Result<(), BusError> {
        self.reset_all();
        Ok(())
    }

    fn reset_all(&self) {
        self.queue.borrow_mut().reset();
        self.subscribers.borrow_mut().clear();
        self.observers.borrow_mut().clear();
        self.epoch.set(Some(Instant::now()));
        self.initialized.set(true);
        debug!(limits = ?self.limits(), "event bus initialized");
    }

    #[inline]
    fn ensure_ready(&self) -> Result<(), BusError> {
        if self.initialized.get() {
            Ok(())
        } else {
            Err(BusError::NotInitialized)
        }
    }

    /// Milliseconds since the last `init`, wrapping at `u32::MAX`.
    fn now_ms(&self) -> u32 {
        self.epoch
            .get()
            .map_or(0, |epoch| epoch.elapsed().as_millis() as u32)
    }

    /// Registers `callback` for records of `event_type`.
    ///
    /// The lowest free slot of that type's row is used, which fixes the
    /// callback's position in dispatch order.
    ///
    /// ### Errors
    /// - [`BusError::NotInitialized`]
    /// - [`BusError::InvalidArgument`] if `event_type >= TYPES`
    /// - [`BusError::TableFull`] if all `SUBSCRIBERS` slots of the row are used
    pub fn subscribe(
        &self,
        event_type: EventType,
        callback: Callback<PAYLOAD>,
        context: Context,
    ) -> Result<(), BusError> {
        self.ensure_ready()?;
        let slot = self
            .subscribers
            .borrow_mut()
            .add(event_type, callback, context)?;
        debug!(event_type, slot, "subscribed");
        Ok(())
    }

    /// Removes the subscription matching both `callback` and `context`.
    ///
    /// ### Errors
    /// - [`BusError::NotInitialized`]
    /// - [`BusError::InvalidArgument`] if `event_type >= TYPES`
    /// - [`BusError::NotFound`] if no slot of that type matches
    pub fn unsubscribe(
        &self,
        event_type: EventType,
        callback: Callback<PAYLOAD>,
        context: Context,
    ) -> Result<(), BusError> {
        self.ensure_ready()?;
        let slot = self
            .subscribers
            .borrow_mut()
            .remove(event_type, callback, context)?;
        debug!(event_type, slot, "unsubscribed");
        Ok(())
    }

    /// Queues an event carrying a copy of `data`.
    ///
    /// The timestamp is sampled here. On [`BusError::QueueFull`] the event is
    /// dropped; there is no retry and no blocking.
    ///
    /// ### Errors
    /// - [`BusError::NotInitialized`]
    /// - [`BusError::InvalidArgument`] if `event_type >= TYPES` or `data.len() > PAYLOAD`
    /// - [`BusError::QueueFull`] if `QUEUE` events are already buffered
    pub fn publish(
        &self,
        event_type: EventType,
        priority: Priority,
        data: &[u8],
    ) -> Result<(), BusError> {
        self.ensure_ready()?;
        if usize::from(event_type) >= TYPES {
            return Err(ArgumentError::EventTypeOutOfRange {
                event_type,
                limit: TYPES,
            }
            .into());
        }
        let record = EventRecord::new(event_type, priority, self.now_ms(), data)?;

        let pushed = self.queue.borrow_mut().push(record);
        if pushed.is_err() {
            warn!(event_type, capacity = QUEUE, "event dropped: queue full");
            return Err(BusError::QueueFull { capacity: QUEUE });
        }
        debug!(event_type, priority, len = data.len(), "event published");
        Ok(())
    }

    /// Drains the queue, dispatching every record; returns how many were dispatched.
    ///
    /// An empty queue is not an error: the result is `Ok(0)` and no callback runs.
    ///
    /// ### Errors
    /// - [`BusError::NotInitialized`]
    pub fn process(&self) -> Result<u32, BusError> {
        self.ensure_ready()?;

        let mut dispatched: u32 = 0;
        loop {
            // The queue borrow must end before callbacks run.
            let next = self.queue.borrow_mut().pop();
            let Ok(record) = next else {
                break;
            };
            self.dispatch(&record);
            dispatched = dispatched.wrapping_add(1);
        }

        if dispatched > 0 {
            debug!(dispatched, "events processed");
        }
        Ok(dispatched)
    }

    fn dispatch(&self, record: &EventRecord<PAYLOAD>) {
        let event_type = record.event_type();
        for index in 0..SUBSCRIBERS {
            let entry = self.subscribers.borrow().entry(event_type, index);
            if let Some(entry) = entry {
                (entry.callback)(record, entry.context);
            }
        }
        for index in 0..OBSERVERS {
            let entry = self.observers.borrow().entry(index);
            if let Some(entry) = entry {
                (entry.callback)(record, entry.context);
            }
        }
    }

    /// Drops every queued event; subscribers and observers are kept.
    ///
    /// ### Errors
    /// - [`BusError::NotInitialized`]
    pub fn clear_queue(&self) -> Result<(), BusError> {
        self.ensure_ready()?;
        let dropped = {
            let mut queue = self.queue.borrow_mut();
            let dropped = queue.count();
            queue.reset();
            dropped
        };
        debug!(dropped, "event queue cleared");
        Ok(())
    }

    /// Number of queued events (0 while uninitialized).
    pub fn get_count(&self) -> u16 {
        // QUEUE <= u16::MAX is enforced at compile time.
        self.queue.borrow().count() as u16
    }

    /// Registers a callback invoked for every event type.
    ///
    /// ### Errors
    /// - [`BusError::NotInitialized`]
    /// - [`BusError::TableFull`] if all `OBSERVERS` slots are used
    pub fn register_observer(
        &self,
        callback: Callback<PAYLOAD>,
        context: Context,
    ) -> Result<(), BusError> {
        self.ensure_ready()?;
        let slot = self.observers.borrow_mut().add(callback, context)?;
        debug!(slot, "observer registered");
        Ok(())
    }

    /// Removes the first observer slot holding `callback`, whatever its context.
    ///
    /// ### Errors
    /// - [`BusError::NotInitialized`]
    /// - [`BusError::NotFound`] if no observer slot holds `callback`
    pub fn unregister_observer(&self, callback: Callback<PAYLOAD>) -> Result<(), BusError> {
        self.ensure_ready()?;
        let slot = self.observers.borrow_mut().remove(callback)?;
        debug!(slot, "observer unregistered");
        Ok(())
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    /// True if no event is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Queue depth.
    #[inline]
    pub const fn capacity(&self) -> usize {
        QUEUE
    }

    /// Used subscriber slots for `event_type`.
    pub fn subscriber_count(&self, event_type: EventType) -> Result<usize, BusError> {
        self.ensure_ready()?;
        self.subscribers.borrow().count(event_type)
    }

    /// Used observer slots.
    pub fn observer_count(&self) -> usize {
        self.observers.borrow().count()
    }

    /// Limits this bus was built with.
    pub const fn limits(&self) -> Limits {
        Limits {
            event_types: TYPES,
            subscribers_per_type: SUBSCRIBERS,
            observers: OBSERVERS,
            queue_capacity: QUEUE,
            payload_bytes: PAYLOAD,
        }
    }
}

impl<
    const TYPES: usize,
    const SUBSCRIBERS: usize,
    const OBSERVERS: usize,
    const QUEUE: usize,
    const PAYLOAD: usize,
> Default for Bus<TYPES, SUBSCRIBERS, OBSERVERS, QUEUE, PAYLOAD>
{
    /// Same as [`Bus::new`]: the bus still needs `init`.
    fn default() -> Self {
        Self::new()
    }
}
