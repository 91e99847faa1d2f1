//! Wall-clock driver for a [`KineticModel`].
//!
//! `kinetic-core` is deterministic and clock-free; something still has to
//! tick it every ~15 ms against real time. [`KineticDriver`] does that
//! with one dedicated timer thread per model. The model sits behind a
//! mutex, so ticks and the host's `set_position`/`release` calls are
//! strictly serialized: the timer thread and the embedding thread never
//! mutate state concurrently.
//!
//! The timer thread parks on a condvar whenever the model is idle and is
//! woken by the next gesture, so exactly one timer exists per driver and
//! it only burns cycles while a drag or a decay actually needs them.
//! Dropping the driver signals the thread and joins it before returning,
//! which guarantees no tick can ever fire against a discarded model.

use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use kinetic_core::{KineticModel, MotionConfig};

type PositionCallback = Box<dyn FnMut(f32) + Send + 'static>;

struct DriverState {
    model: KineticModel<PositionCallback>,
    shutdown: bool,
}

struct Shared {
    state: Mutex<DriverState>,
    wake: Condvar,
}

/// Owns a [`KineticModel`] and the periodic timer that animates it.
///
/// The callback runs on whichever thread triggered the change (the timer
/// thread for decay ticks, the caller's thread for `set_position`) while
/// the internal lock is held, so it must not call back into the driver.
pub struct KineticDriver {
    shared: Arc<Shared>,
    epoch: Instant,
    interval: Duration,
    worker: Option<thread::JoinHandle<()>>,
}

impl KineticDriver {
    /// Spawns a driver with default tuning over `[minimum, maximum]`.
    ///
    /// Panics if `minimum > maximum`.
    pub fn new(
        minimum: f32,
        maximum: f32,
        callback: impl FnMut(f32) + Send + 'static,
    ) -> Self {
        Self::with_config(minimum, maximum, MotionConfig::default(), callback)
    }

    /// Spawns a driver with explicit tuning.
    ///
    /// Panics if `minimum > maximum`.
    pub fn with_config(
        minimum: f32,
        maximum: f32,
        config: MotionConfig,
        callback: impl FnMut(f32) + Send + 'static,
    ) -> Self {
        let model = KineticModel::with_config(minimum, maximum, config, {
            let boxed: PositionCallback = Box::new(callback);
            boxed
        });
        let shared = Arc::new(Shared {
            state: Mutex::new(DriverState {
                model,
                shutdown: false,
            }),
            wake: Condvar::new(),
        });
        let epoch = Instant::now();
        let interval = Duration::from_millis(config.update_interval_ms.max(1) as u64);

        let worker = thread::spawn({
            let shared = Arc::clone(&shared);
            move || tick_loop(&shared, epoch, interval)
        });

        Self {
            shared,
            epoch,
            interval,
            worker: Some(worker),
        }
    }

    /// Forwards a drag position to the model and wakes the timer.
    pub fn set_position(&self, pos: f32) {
        let now_ms = self.now_ms();
        let mut state = self.shared.state.lock().unwrap();
        state.model.set_position(pos, now_ms);
        if state.model.needs_ticks() {
            self.shared.wake.notify_one();
        }
    }

    /// Ends the gesture; the timer keeps running while the value decays.
    pub fn release(&self) {
        let now_ms = self.now_ms();
        let mut state = self.shared.state.lock().unwrap();
        state.model.release(now_ms);
        if state.model.needs_ticks() {
            self.shared.wake.notify_one();
        }
    }

    /// Kills any momentum without ending an active drag.
    pub fn reset_speed(&self) {
        let now_ms = self.now_ms();
        let mut state = self.shared.state.lock().unwrap();
        state.model.reset_speed(now_ms);
    }

    pub fn position(&self) -> f32 {
        self.shared.state.lock().unwrap().model.position()
    }

    /// True once the model has settled and the timer is parked.
    pub fn is_idle(&self) -> bool {
        !self.shared.state.lock().unwrap().model.needs_ticks()
    }

    /// The cadence the timer thread ticks at.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn now_ms(&self) -> i64 {
        self.epoch.elapsed().as_millis() as i64
    }
}

impl Drop for KineticDriver {
    fn drop(&mut self) {
        {
            let mut state = self.shared.state.lock().unwrap();
            state.shutdown = true;
        }
        self.shared.wake.notify_one();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn tick_loop(shared: &Shared, epoch: Instant, interval: Duration) {
    let mut state = shared.state.lock().unwrap();
    loop {
        if state.shutdown {
            break;
        }
        if state.model.needs_ticks() {
            // Sleep one cadence (or until woken for shutdown), then tick.
            // The model integrates over measured elapsed time, so late or
            // spurious wakeups only change tick granularity, not physics.
            let (guard, _) = shared.wake.wait_timeout(state, interval).unwrap();
            state = guard;
            if state.shutdown {
                break;
            }
            let now_ms = epoch.elapsed().as_millis() as i64;
            state.model.tick(now_ms);
        } else {
            log::trace!("kinetic ticker parked");
            state = shared.wake.wait(state).unwrap();
        }
    }
}
