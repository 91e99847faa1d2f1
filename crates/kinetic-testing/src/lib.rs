//! Deterministic harness for exercising a [`KineticModel`] in tests.
//!
//! Real drivers tick on a wall-clock timer; tests instead script gestures
//! against a synthetic millisecond clock and advance it in fixed steps, so
//! every run is reproducible and callback sequences can be asserted
//! exactly.

use std::cell::RefCell;
use std::rc::Rc;

use kinetic_core::{KineticModel, MotionConfig, Phase};

/// A model plus a synthetic clock and a recorder for callback positions.
pub struct ModelHarness {
    model: KineticModel<Box<dyn FnMut(f32)>>,
    positions: Rc<RefCell<Vec<f32>>>,
    now_ms: i64,
    tick_interval_ms: i64,
}

impl ModelHarness {
    pub fn new(minimum: f32, maximum: f32) -> Self {
        Self::with_config(minimum, maximum, MotionConfig::default())
    }

    pub fn with_config(minimum: f32, maximum: f32, config: MotionConfig) -> Self {
        let positions = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&positions);
        let callback: Box<dyn FnMut(f32)> = Box::new(move |pos| sink.borrow_mut().push(pos));
        Self {
            model: KineticModel::with_config(minimum, maximum, config, callback),
            positions,
            now_ms: 0,
            tick_interval_ms: config.update_interval_ms,
        }
    }

    /// Current synthetic time in milliseconds.
    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    /// Feeds a drag position at the current synthetic time.
    pub fn drag_to(&mut self, pos: f32) {
        self.model.set_position(pos, self.now_ms);
    }

    /// Releases the gesture at the current synthetic time.
    pub fn release(&mut self) {
        self.model.release(self.now_ms);
    }

    /// One frame of an ongoing drag: advances the clock by a tick
    /// interval, moves the pointer to `pos`, then lets the tick sample
    /// the movement, matching how drag events and timer ticks interleave
    /// in a real event loop.
    pub fn drag_frame(&mut self, pos: f32) {
        self.now_ms += self.tick_interval_ms;
        self.model.set_position(pos, self.now_ms);
        self.model.tick(self.now_ms);
    }

    /// Advances the clock by `ms`, ticking at the configured cadence along
    /// the way (a trailing partial step still ticks, like a jittery timer
    /// would).
    pub fn advance(&mut self, ms: i64) {
        let target = self.now_ms + ms;
        while self.now_ms < target {
            let step = self.tick_interval_ms.min(target - self.now_ms);
            self.now_ms += step;
            self.model.tick(self.now_ms);
        }
    }

    /// Ticks until the model is idle, giving up after `max_ms` of
    /// synthetic time. Returns whether idle was reached.
    pub fn run_until_idle(&mut self, max_ms: i64) -> bool {
        let deadline = self.now_ms + max_ms;
        while self.model.needs_ticks() && self.now_ms < deadline {
            self.advance(self.tick_interval_ms);
        }
        !self.model.needs_ticks()
    }

    /// Every position the callback has observed so far.
    pub fn positions(&self) -> Vec<f32> {
        self.positions.borrow().clone()
    }

    /// Drains the recorded positions, leaving the recorder empty.
    pub fn take_positions(&mut self) -> Vec<f32> {
        std::mem::take(&mut *self.positions.borrow_mut())
    }

    pub fn position(&self) -> f32 {
        self.model.position()
    }

    pub fn velocity(&self) -> f32 {
        self.model.velocity()
    }

    pub fn phase(&self) -> Phase {
        self.model.phase()
    }

    pub fn model_mut(&mut self) -> &mut KineticModel<Box<dyn FnMut(f32)>> {
        &mut self.model
    }
}
