//! Behavior of the public bus surface: ordering, capacity, isolation, identity.

use std::cell::RefCell;

use slotbus::{ArgumentError, Bus, BusError, Context, EventRecord, TableKind, config};

const TYPE_A: u16 = 1;
const TYPE_B: u16 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Seen {
    who: &'static str,
    event_type: u16,
    priority: u8,
    payload: Vec<u8>,
    context: usize,
}

thread_local! {
    static LOG: RefCell<Vec<Seen>> = const { RefCell::new(Vec::new()) };
}

fn record(who: &'static str, ev: &EventRecord, ctx: Context) {
    LOG.with(|log| {
        log.borrow_mut().push(Seen {
            who,
            event_type: ev.event_type(),
            priority: ev.priority(),
            payload: ev.payload().to_vec(),
            context: ctx.get(),
        })
    });
}

fn drain_log() -> Vec<Seen> {
    LOG.with(|log| std::mem::take(&mut *log.borrow_mut()))
}

fn cb_a(ev: &EventRecord, ctx: Context) {
    record("cb_a", ev, ctx);
}

fn cb_b(ev: &EventRecord, ctx: Context) {
    record("cb_b", ev, ctx);
}

fn obs_x(ev: &EventRecord, ctx: Context) {
    record("obs_x", ev, ctx);
}

fn obs_y(ev: &EventRecord, ctx: Context) {
    record("obs_y", ev, ctx);
}

#[test]
fn test_single_event_reaches_subscriber_and_observer() {
    drain_log();
    let bus: Bus = Bus::new();
    bus.init().unwrap();
    bus.subscribe(TYPE_A, cb_a, Context::NONE).unwrap();
    bus.register_observer(obs_x, Context::NONE).unwrap();

    assert_eq!(bus.publish(TYPE_A, 1, &[0x01, 0x68]), Ok(()));
    assert_eq!(bus.process(), Ok(1));

    let expected = |who| Seen {
        who,
        event_type: TYPE_A,
        priority: 1,
        payload: vec![0x01, 0x68],
        context: 0,
    };
    assert_eq!(drain_log(), vec![expected("cb_a"), expected("obs_x")]);
    assert_eq!(bus.get_count(), 0);
}

#[test]
fn test_fifo_order_across_one_process() {
    drain_log();
    let bus: Bus = Bus::ready();
    bus.register_observer(obs_x, Context::NONE).unwrap();

    for i in 0..10u8 {
        // priority deliberately descending: it must not reorder anything
        bus.publish(u16::from(i % 3), 10 - i, &[i]).unwrap();
    }
    assert_eq!(bus.process(), Ok(10));

    let payloads: Vec<u8> = drain_log().into_iter().map(|s| s.payload[0]).collect();
    assert_eq!(payloads, (0..10u8).collect::<Vec<_>>());
}

#[test]
fn test_bounded_capacity() {
    let bus: Bus = Bus::ready();
    for _ in 0..config::QUEUE_CAPACITY {
        bus.publish(TYPE_B, 0, &[]).unwrap();
    }
    assert_eq!(
        bus.publish(TYPE_B, 0, &[]),
        Err(BusError::QueueFull {
            capacity: config::QUEUE_CAPACITY
        })
    );
    assert_eq!(usize::from(bus.get_count()), config::QUEUE_CAPACITY);

    // draining frees room again
    assert_eq!(bus.process(), Ok(config::QUEUE_CAPACITY as u32));
    assert_eq!(bus.publish(TYPE_B, 0, &[]), Ok(()));
}

#[test]
fn test_type_isolation() {
    drain_log();
    let bus: Bus = Bus::ready();
    bus.subscribe(TYPE_A, cb_a, Context::NONE).unwrap();
    bus.subscribe(TYPE_B, cb_b, Context::NONE).unwrap();
    bus.register_observer(obs_x, Context::NONE).unwrap();

    bus.publish(TYPE_B, 0, &[]).unwrap();
    bus.publish(7, 0, &[]).unwrap();
    bus.process().unwrap();

    let seen: Vec<(&str, u16)> = drain_log()
        .into_iter()
        .map(|s| (s.who, s.event_type))
        .collect();
    assert_eq!(seen, vec![("cb_b", TYPE_B), ("obs_x", TYPE_B), ("obs_x", 7)]);
}

#[test]
fn test_process_on_empty_queue() {
    drain_log();
    let bus: Bus = Bus::ready();
    bus.subscribe(TYPE_A, cb_a, Context::NONE).unwrap();
    bus.register_observer(obs_x, Context::NONE).unwrap();

    assert_eq!(bus.process(), Ok(0));
    assert_eq!(bus.process(), Ok(0));
    assert!(drain_log().is_empty());
}

#[test]
fn test_unsubscribe_matches_callback_and_context() {
    drain_log();
    let bus: Bus = Bus::ready();
    bus.subscribe(TYPE_A, cb_a, Context::new(1)).unwrap();
    bus.subscribe(TYPE_A, cb_a, Context::new(2)).unwrap();
    bus.unsubscribe(TYPE_A, cb_a, Context::new(1)).unwrap();

    bus.publish(TYPE_A, 0, &[]).unwrap();
    bus.process().unwrap();

    let contexts: Vec<usize> = drain_log().into_iter().map(|s| s.context).collect();
    assert_eq!(contexts, vec![2]);

    assert_eq!(
        bus.unsubscribe(TYPE_A, cb_a, Context::new(1)),
        Err(BusError::NotFound {
            table: TableKind::Subscribers
        })
    );
}

#[test]
fn test_unregister_observer_ignores_context() {
    drain_log();
    let bus: Bus = Bus::ready();
    bus.register_observer(obs_x, Context::new(11)).unwrap();
    bus.register_observer(obs_y, Context::new(12)).unwrap();
    bus.unregister_observer(obs_x).unwrap();

    bus.publish(TYPE_A, 0, &[]).unwrap();
    bus.process().unwrap();

    let seen: Vec<&str> = drain_log().into_iter().map(|s| s.who).collect();
    assert_eq!(seen, vec!["obs_y"]);
    assert_eq!(
        bus.unregister_observer(obs_x),
        Err(BusError::NotFound {
            table: TableKind::Observers
        })
    );
}

#[test]
fn test_reinit_resets_everything() {
    drain_log();
    let bus: Bus = Bus::ready();
    bus.subscribe(TYPE_A, cb_a, Context::NONE).unwrap();
    bus.register_observer(obs_x, Context::NONE).unwrap();
    bus.publish(TYPE_A, 0, &[1]).unwrap();
    bus.publish(TYPE_A, 0, &[2]).unwrap();

    bus.init().unwrap();
    assert_eq!(bus.get_count(), 0);
    assert_eq!(bus.process(), Ok(0));
    assert_eq!(bus.observer_count(), 0);
    assert_eq!(bus.subscriber_count(TYPE_A), Ok(0));

    // tables are empty, so a fresh event reaches nobody
    bus.publish(TYPE_A, 0, &[3]).unwrap();
    assert_eq!(bus.process(), Ok(1));
    assert!(drain_log().is_empty());
}

#[test]
fn test_oversized_payload_rejected() {
    let bus: Bus = Bus::ready();
    bus.publish(TYPE_A, 0, &[0]).unwrap();

    let data = [0u8; config::MAX_PAYLOAD_BYTES + 1];
    assert_eq!(
        bus.publish(TYPE_A, 0, &data),
        Err(BusError::InvalidArgument(ArgumentError::PayloadTooLarge {
            len: config::MAX_PAYLOAD_BYTES + 1,
            max: config::MAX_PAYLOAD_BYTES,
        }))
    );
    assert_eq!(bus.get_count(), 1);

    let full = [0xEEu8; config::MAX_PAYLOAD_BYTES];
    assert_eq!(bus.publish(TYPE_A, 0, &full), Ok(()));
}

#[test]
fn test_subscriber_row_full() {
    let bus: Bus = Bus::ready();
    for ctx in 0..config::MAX_SUBSCRIBERS_PER_TYPE {
        bus.subscribe(TYPE_B, cb_b, Context::new(ctx)).unwrap();
    }
    assert_eq!(
        bus.subscribe(TYPE_B, cb_b, Context::new(99)),
        Err(BusError::TableFull {
            table: TableKind::Subscribers,
            limit: config::MAX_SUBSCRIBERS_PER_TYPE
        })
    );
    // another type still has room
    assert_eq!(bus.subscribe(TYPE_A, cb_b, Context::new(99)), Ok(()));
}

#[test]
fn test_observer_table_full() {
    let bus: Bus = Bus::ready();
    for ctx in 0..config::MAX_OBSERVERS {
        bus.register_observer(obs_x, Context::new(ctx)).unwrap();
    }
    assert!(matches!(
        bus.register_observer(obs_y, Context::NONE),
        Err(BusError::TableFull {
            table: TableKind::Observers,
            ..
        })
    ));
}

#[test]
fn test_out_of_range_type_rejected() {
    let bus: Bus = Bus::ready();
    let bad = config::MAX_EVENT_TYPES as u16;
    let expected = Err(BusError::InvalidArgument(
        ArgumentError::EventTypeOutOfRange {
            event_type: bad,
            limit: config::MAX_EVENT_TYPES,
        },
    ));
    assert_eq!(bus.subscribe(bad, cb_a, Context::NONE), expected);
    assert_eq!(bus.publish(bad, 0, &[]), expected);
    assert_eq!(bus.get_count(), 0);
}

#[test]
fn test_custom_limits() {
    fn small(_: &EventRecord<2>, _: Context) {}

    let bus: Bus<2, 1, 1, 2, 2> = Bus::ready();
    bus.subscribe(1, small, Context::NONE).unwrap();
    assert!(bus.subscribe(1, small, Context::new(1)).is_err());
    assert!(bus.publish(2, 0, &[]).is_err());
    assert!(bus.publish(1, 0, &[1, 2, 3]).is_err());
    bus.publish(1, 0, &[1, 2]).unwrap();
    bus.publish(0, 0, &[]).unwrap();
    assert_eq!(bus.publish(0, 0, &[]), Err(BusError::QueueFull { capacity: 2 }));
    assert_eq!(bus.process(), Ok(2));
}
