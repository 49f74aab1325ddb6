//! # Sensor Events Demo
//!
//! Wires a few callbacks onto a bus and walks through one publish/process cycle:
//! - two button subscribers sharing one callback (told apart by context)
//! - a sensor subscriber decoding a temperature payload
//! - an alert subscriber whose context carries the alert level
//! - a global observer plus the built-in [`LogWriter`]
//!
//! ## Run
//! ```bash
//! RUST_LOG=slotbus=debug cargo run --example sensor_events --features logging
//! ```

use slotbus::{Bus, BusError, Context, EventRecord, LogWriter};
use tracing_subscriber::EnvFilter;

const BUTTON_PRESS: u16 = 1;
const SENSOR_DATA: u16 = 2;
const SYSTEM_ALERT: u16 = 3;
const USER_LOGIN: u16 = 4;

const PRIORITY_NORMAL: u8 = 1;
const PRIORITY_HIGH: u8 = 2;

const BUTTONS: [&str; 2] = ["start", "stop"];

fn on_button_press(ev: &EventRecord, ctx: Context) {
    let name = BUTTONS.get(ctx.get()).copied().unwrap_or("unknown");
    println!("\x1b[1;33m[callback] button pressed\x1b[0m");
    println!("   ├─► button:    {name}");
    println!("   ├─► timestamp: {} ms", ev.timestamp_ms());
    println!("   └─► priority:  {}\n", ev.priority());
}

fn on_sensor_data(ev: &EventRecord, _ctx: Context) {
    println!("\x1b[1;32m[callback] sensor data arrived\x1b[0m");
    let data = ev.payload();
    let hex: Vec<String> = data.iter().map(|b| format!("{b:02X}")).collect();
    println!("   ├─► length: {} bytes", data.len());
    println!("   ├─► bytes:  {}", hex.join(" "));
    if let [hi, lo, ..] = data {
        let raw = u16::from_be_bytes([*hi, *lo]);
        println!("   └─► temperature: {:.1} °C", f32::from(raw) / 10.0);
    }
    println!();
}

fn on_system_alert(ev: &EventRecord, ctx: Context) {
    println!("\x1b[1;31m[callback] system alert\x1b[0m");
    println!("   ├─► level:   {}", ctx.get());
    println!("   ├─► message: {}", String::from_utf8_lossy(ev.payload()));
    println!("   └─► at:      {} ms\n", ev.timestamp_ms());
}

fn global_observer(ev: &EventRecord, _ctx: Context) {
    let name = match ev.event_type() {
        BUTTON_PRESS => "button press",
        SENSOR_DATA => "sensor data",
        SYSTEM_ALERT => "system alert",
        USER_LOGIN => "user login",
        _ => "other",
    };
    println!("\x1b[1;36m=== observer caught event ===\x1b[0m");
    println!("   type:      {} ({name})", ev.event_type());
    println!("   priority:  {}", ev.priority());
    println!("   timestamp: {} ms", ev.timestamp_ms());
    println!("   size:      {} bytes", ev.payload_len());
    println!("\x1b[1;36m=============================\x1b[0m\n");
}

fn main() -> Result<(), BusError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("\x1b[1;34m========== event bus demo ==========\x1b[0m\n");

    let bus: Bus = Bus::new();
    bus.init()?;

    bus.subscribe(BUTTON_PRESS, on_button_press, Context::new(0))?;
    bus.subscribe(BUTTON_PRESS, on_button_press, Context::new(1))?;
    bus.subscribe(SENSOR_DATA, on_sensor_data, Context::NONE)?;
    bus.subscribe(SYSTEM_ALERT, on_system_alert, Context::new(3))?;
    bus.register_observer(global_observer, Context::NONE)?;
    LogWriter::attach(&bus)?;

    println!("\x1b[1;35m→ subscriptions ready, publishing...\x1b[0m\n");

    bus.publish(BUTTON_PRESS, PRIORITY_HIGH, &[])?;
    // 36.8 °C → 0x0170
    bus.publish(SENSOR_DATA, PRIORITY_NORMAL, &[0x01, 0x70])?;
    bus.publish(USER_LOGIN, PRIORITY_NORMAL, b"admin\0")?;
    bus.publish(SYSTEM_ALERT, PRIORITY_HIGH, b"power failure")?;

    println!("\x1b[1;35m→ processing queued events...\x1b[0m\n");
    let processed = bus.process()?;

    println!("\x1b[1;32mprocessed {processed} events\x1b[0m");
    println!("left in queue: {}", bus.get_count());
    println!("\n\x1b[1;34m========== done ==========\x1b[0m");
    Ok(())
}
