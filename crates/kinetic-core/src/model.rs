//! The kinetic motion state machine.
//!
//! A [`KineticModel`] is driven from outside on two paths: the host calls
//! [`KineticModel::set_position`] for every drag movement and
//! [`KineticModel::release`] when the gesture ends, and a periodic driver
//! calls [`KineticModel::tick`] roughly every
//! [`crate::motion_constants::UPDATE_INTERVAL_MS`] milliseconds for as long
//! as [`KineticModel::needs_ticks`] is true. While the drag is held, ticks
//! estimate velocity from position deltas; after release, ticks integrate
//! the position forward under deceleration until the motion settles.
//!
//! The model never reads a clock. Every operation takes `now_ms`, a
//! monotonic millisecond timestamp supplied by the caller, which keeps the
//! physics deterministic under test and correct under scheduling jitter
//! (integration is elapsed-time based, not tick-count based).

use crate::config::{MotionConfig, NotifyPolicy};

/// Where the model is in its drag/fling lifecycle.
///
/// Drivers must tick exactly while the phase is not [`Phase::Idle`];
/// the model itself guarantees `velocity == 0` whenever it is idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// At rest. No ticks are needed and none have any effect.
    Idle,
    /// A drag is active; ticks sample velocity from position deltas.
    Sampling,
    /// Released; ticks advance the position and bleed velocity off.
    Decaying,
}

/// Momentum model for one draggable scalar, clamped to `[minimum, maximum]`.
///
/// The callback is invoked with the new position on every externally
/// visible change: once per `set_position` call (see
/// [`NotifyPolicy`]) and once per decaying tick.
pub struct KineticModel<F: FnMut(f32)> {
    minimum: f32,
    maximum: f32,
    config: MotionConfig,
    phase: Phase,
    position: f32,
    velocity: f32,
    last_position: f32,
    last_sample_ms: i64,
    release_ms: i64,
    deceleration: f32,
    speed_threshold: f32,
    callback: F,
}

impl<F: FnMut(f32)> KineticModel<F> {
    /// Creates a model with default tuning. The initial position is zero
    /// clamped into the bounds.
    ///
    /// Panics if `minimum > maximum`.
    pub fn new(minimum: f32, maximum: f32, callback: F) -> Self {
        Self::with_config(minimum, maximum, MotionConfig::default(), callback)
    }

    /// Creates a model with explicit tuning.
    ///
    /// Panics if `minimum > maximum`.
    pub fn with_config(minimum: f32, maximum: f32, config: MotionConfig, callback: F) -> Self {
        assert!(
            minimum <= maximum,
            "invalid bounds: minimum {minimum} > maximum {maximum}"
        );
        let position = 0.0f32.clamp(minimum, maximum);
        Self {
            minimum,
            maximum,
            config,
            phase: Phase::Idle,
            position,
            velocity: 0.0,
            last_position: position,
            last_sample_ms: 0,
            release_ms: 0,
            deceleration: 0.0,
            speed_threshold: 0.0,
            callback,
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Current velocity estimate in units/sec.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn minimum(&self) -> f32 {
        self.minimum
    }

    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    /// True while the model wants periodic [`KineticModel::tick`] calls.
    pub fn needs_ticks(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Moves the value under direct control of a drag gesture.
    ///
    /// The position is clamped into bounds, the model (re)enters
    /// [`Phase::Sampling`], and the callback observes the clamped value
    /// according to the configured [`NotifyPolicy`]. A non-finite `pos`
    /// is ignored entirely.
    ///
    /// Velocity is not recomputed here; sampling is the tick's job, which
    /// decouples the velocity estimate from however fast the host happens
    /// to deliver move events.
    pub fn set_position(&mut self, pos: f32, now_ms: i64) {
        if !pos.is_finite() {
            log::trace!("ignoring non-finite position {pos}");
            return;
        }
        let clamped = self.clamp(pos);
        let changed = clamped != self.position;
        self.position = clamped;

        if self.phase != Phase::Sampling {
            // A new gesture, possibly grabbing a value mid-decay. Refresh
            // the sampling baseline so a stale timestamp cannot turn into
            // a huge spurious instantaneous velocity on the next tick.
            // The current velocity is kept: a catch-and-rethrow keeps its
            // momentum feel.
            self.last_position = clamped;
            self.last_sample_ms = now_ms;
            log::debug!("drag begins at {clamped}");
            self.phase = Phase::Sampling;
        }

        if changed || self.config.notify_policy == NotifyPolicy::Always {
            (self.callback)(self.position);
        }
    }

    /// Ends the drag gesture and hands the value over to decay.
    ///
    /// Takes one final velocity sample (so the last stretch of the drag
    /// counts), clamps the estimate to the configured speed cap, and
    /// derives the decay parameters from it: the deceleration is the
    /// release speed spread over the decay duration, and the fast/gentle
    /// threshold is a fraction of the release speed.
    ///
    /// A release below the minimum fling speed settles immediately with
    /// no decay ticks and no callback. Calling release again while
    /// already decaying just recomputes the parameters from whatever
    /// velocity currently holds.
    pub fn release(&mut self, now_ms: i64) {
        if self.phase == Phase::Sampling {
            self.sample(now_ms);
        }

        let max = self.config.max_speed;
        self.velocity = self.velocity.clamp(-max, max);
        let speed = self.velocity.abs();

        if !(speed >= self.config.min_fling_speed) {
            // Nothing worth animating (also catches a NaN estimate).
            self.settle();
            return;
        }

        self.deceleration = speed / self.config.decay_duration_secs();
        self.speed_threshold = speed * self.config.speed_threshold_fraction;
        self.release_ms = now_ms;
        self.last_sample_ms = now_ms;
        self.phase = Phase::Decaying;
        log::debug!("released at {} with velocity {}", self.position, self.velocity);
    }

    /// Zeroes the velocity estimate and, if a decay was in flight, stops
    /// it where it is. An active drag stays active.
    pub fn reset_speed(&mut self, now_ms: i64) {
        self.velocity = 0.0;
        self.last_position = self.position;
        self.last_sample_ms = now_ms;
        if self.phase == Phase::Decaying {
            self.settle();
        }
    }

    /// One step of the periodic simulation.
    ///
    /// Elapsed time below the minimum resolvable interval (including a
    /// non-positive or otherwise degenerate value) makes the tick a no-op.
    /// Stray ticks while idle are also no-ops and invoke no callback.
    pub fn tick(&mut self, now_ms: i64) {
        match self.phase {
            Phase::Idle => {}
            Phase::Sampling => self.sample(now_ms),
            Phase::Decaying => self.decay(now_ms),
        }
    }

    /// Blends the instantaneous velocity since the last sample into the
    /// running estimate.
    fn sample(&mut self, now_ms: i64) {
        let elapsed_ms = now_ms - self.last_sample_ms;
        if elapsed_ms < self.config.min_tick_interval_ms {
            return;
        }

        let dt = elapsed_ms as f32 / 1000.0;
        let instantaneous = (self.position - self.last_position) / dt;
        if instantaneous.is_finite() && instantaneous.abs() > self.config.min_sample_speed {
            let w = self.config.new_sample_weight;
            self.velocity = (1.0 - w) * self.velocity + w * instantaneous;
        }

        self.last_position = self.position;
        self.last_sample_ms = now_ms;
    }

    /// Advances the free-running value and bleeds velocity toward zero.
    fn decay(&mut self, now_ms: i64) {
        let elapsed_ms = now_ms - self.last_sample_ms;
        if elapsed_ms < self.config.min_tick_interval_ms {
            return;
        }
        self.last_sample_ms = now_ms;

        let dt = elapsed_ms as f32 / 1000.0;
        let unclamped = self.position + self.velocity * dt;
        self.position = self.clamp(unclamped);
        let hit_bound = self.position != unclamped;

        let mut vstep = self.deceleration * dt;
        if self.velocity.abs() > self.speed_threshold {
            vstep *= self.config.fast_decay_factor;
        }

        let expired = now_ms - self.release_ms >= self.config.decay_duration_ms;
        if hit_bound || expired || vstep >= self.velocity.abs() {
            // Ran into a wall, out of time, or the step would cross zero:
            // snap to rest rather than overshoot.
            self.settle();
        } else {
            self.velocity -= vstep.copysign(self.velocity);
        }

        (self.callback)(self.position);
    }

    fn settle(&mut self) {
        if self.phase != Phase::Idle {
            log::debug!("settled at {}", self.position);
        }
        self.velocity = 0.0;
        self.deceleration = 0.0;
        self.phase = Phase::Idle;
    }

    fn clamp(&self, pos: f32) -> f32 {
        pos.clamp(self.minimum, self.maximum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_model(
        minimum: f32,
        maximum: f32,
        config: MotionConfig,
    ) -> (KineticModel<impl FnMut(f32)>, Rc<RefCell<Vec<f32>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let model = KineticModel::with_config(minimum, maximum, config, move |pos| {
            sink.borrow_mut().push(pos);
        });
        (model, seen)
    }

    #[test]
    fn set_position_clamps_below_minimum() {
        let (mut model, _) = recording_model(10.0, 100.0, MotionConfig::default());
        model.set_position(10.0 - 37.5, 0);
        assert_eq!(model.position(), 10.0);
    }

    #[test]
    fn set_position_clamps_above_maximum() {
        let (mut model, seen) = recording_model(0.0, 100.0, MotionConfig::default());
        model.set_position(50.0, 0);
        model.set_position(150.0, 0);
        assert_eq!(seen.borrow().as_slice(), &[50.0, 100.0]);
    }

    #[test]
    fn always_policy_reports_unchanged_position() {
        let (mut model, seen) = recording_model(0.0, 100.0, MotionConfig::default());
        model.set_position(40.0, 0);
        model.set_position(40.0, 15);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn on_change_policy_skips_unchanged_position() {
        let config = MotionConfig {
            notify_policy: NotifyPolicy::OnChange,
            ..MotionConfig::default()
        };
        let (mut model, seen) = recording_model(0.0, 100.0, config);
        model.set_position(40.0, 0);
        model.set_position(40.0, 15);
        model.set_position(140.0, 30); // clamps to 100
        assert_eq!(seen.borrow().as_slice(), &[40.0, 100.0]);
    }

    #[test]
    fn non_finite_position_is_ignored() {
        let (mut model, seen) = recording_model(0.0, 100.0, MotionConfig::default());
        model.set_position(25.0, 0);
        model.set_position(f32::NAN, 15);
        model.set_position(f32::INFINITY, 30);
        assert_eq!(model.position(), 25.0);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn release_without_velocity_settles_immediately() {
        let (mut model, seen) = recording_model(0.0, 100.0, MotionConfig::default());
        model.set_position(50.0, 0);
        seen.borrow_mut().clear();

        model.release(15);

        assert_eq!(model.phase(), Phase::Idle);
        assert_eq!(model.velocity(), 0.0);
        assert!(!model.needs_ticks());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn sampling_blends_instantaneous_velocity() {
        let (mut model, _) = recording_model(0.0, 10_000.0, MotionConfig::default());
        model.set_position(0.0, 0);
        model.set_position(15.0, 15);
        model.tick(15); // (15 - 0) / 15ms = 1000 units/s
        assert!((model.velocity() - 800.0).abs() < 1.0, "got {}", model.velocity());

        model.set_position(30.0, 30);
        model.tick(30);
        assert!((model.velocity() - 960.0).abs() < 1.0, "got {}", model.velocity());
    }

    #[test]
    fn sub_unit_speeds_do_not_disturb_the_estimate() {
        let (mut model, _) = recording_model(0.0, 10_000.0, MotionConfig::default());
        model.set_position(0.0, 0);
        model.set_position(100.0, 15);
        model.tick(15);
        let estimate = model.velocity();
        assert!(estimate > 0.0);

        // Pointer holds still: 0 units/s is below the sample gate.
        model.tick(30);
        model.tick(45);
        assert_eq!(model.velocity(), estimate);
    }

    #[test]
    fn too_fast_tick_is_a_no_op() {
        let (mut model, _) = recording_model(0.0, 10_000.0, MotionConfig::default());
        model.set_position(0.0, 0);
        model.set_position(500.0, 2);
        model.tick(2); // only 2ms since the baseline: unmeasurable
        assert_eq!(model.velocity(), 0.0);
    }

    #[test]
    fn release_clamps_velocity_to_max_speed() {
        let (mut model, _) = recording_model(0.0, 1.0e9, MotionConfig::default());
        model.set_position(0.0, 0);
        model.set_position(1.0e6, 15);
        model.tick(15); // ~6.7e7 units/s
        model.release(30);
        assert!(model.velocity().abs() <= MotionConfig::default().max_speed);
    }

    #[test]
    fn release_while_decaying_recomputes_from_current_velocity() {
        let (mut model, _) = recording_model(0.0, 1.0e6, MotionConfig::default());
        model.set_position(0.0, 0);
        model.set_position(30.0, 15);
        model.tick(15);
        model.release(30);
        assert_eq!(model.phase(), Phase::Decaying);

        let v_before = model.velocity();
        model.tick(45);
        model.tick(60);
        assert!(model.velocity().abs() < v_before.abs());

        // Second release mid-decay: still decaying, from the reduced speed.
        model.release(60);
        assert_eq!(model.phase(), Phase::Decaying);
        assert!(model.velocity().abs() <= v_before.abs());
    }

    #[test]
    fn reset_speed_stops_a_decay_in_place() {
        let (mut model, _) = recording_model(0.0, 1.0e6, MotionConfig::default());
        model.set_position(0.0, 0);
        model.set_position(30.0, 15);
        model.tick(15);
        model.release(30);
        model.tick(45);
        let parked = model.position();

        model.reset_speed(60);

        assert_eq!(model.phase(), Phase::Idle);
        assert_eq!(model.velocity(), 0.0);
        assert_eq!(model.position(), parked);
    }

    #[test]
    fn idle_tick_does_nothing() {
        let (mut model, seen) = recording_model(0.0, 100.0, MotionConfig::default());
        model.tick(100);
        model.tick(200);
        assert_eq!(model.phase(), Phase::Idle);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    #[should_panic(expected = "invalid bounds")]
    fn inverted_bounds_are_rejected() {
        let _ = KineticModel::new(10.0, 0.0, |_| {});
    }
}
