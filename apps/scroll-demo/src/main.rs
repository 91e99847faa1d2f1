//! Scripted drag-and-fling against a real timer-driven model.
//!
//! Prints every position the controller reports: first the held drag
//! positions, then the coasting values as the fling decays to rest.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use kinetic_core::{MotionConfig, NotifyPolicy};
use kinetic_runtime_std::KineticDriver;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Kinetic scroll demo ===");
    println!("Dragging a value from 0 toward 300, then letting go;");
    println!("watch it coast and settle inside [0, 1000].");
    println!();

    let updates = Arc::new(AtomicUsize::new(0));
    let updates_in_callback = Arc::clone(&updates);
    let config = MotionConfig {
        notify_policy: NotifyPolicy::OnChange,
        ..MotionConfig::default()
    };
    let driver = KineticDriver::with_config(0.0, 1000.0, config, move |pos| {
        updates_in_callback.fetch_add(1, Ordering::Relaxed);
        println!("position: {pos:8.2}");
    });

    // A steady ~2000 units/s drag, one move per tick interval.
    for frame in 0..=10 {
        driver.set_position(frame as f32 * 30.0);
        thread::sleep(driver.interval());
    }
    log::info!("releasing at {:.2}", driver.position());
    driver.release();

    let deadline = Instant::now() + Duration::from_secs(5);
    while !driver.is_idle() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(30));
    }

    println!();
    println!(
        "settled at {:.2} after {} position updates",
        driver.position(),
        updates.load(Ordering::Relaxed)
    );
}
