//! Runtime tunables for the kinetic model.

use crate::motion_constants;

/// Whether `set_position` reports a value that did not actually change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyPolicy {
    /// Every `set_position` call invokes the callback exactly once, even
    /// when the clamped value equals the current position.
    Always,
    /// The callback fires only when the clamped value differs from the
    /// current position.
    OnChange,
}

/// Tuning knobs for [`crate::KineticModel`].
///
/// Defaults come from [`motion_constants`]; see that module for the
/// rationale behind each value.
#[derive(Debug, Clone, Copy)]
pub struct MotionConfig {
    /// Tick cadence drivers should schedule at, in milliseconds.
    pub update_interval_ms: i64,
    /// Elapsed time below this is treated as an unmeasurable tick.
    pub min_tick_interval_ms: i64,
    /// EMA weight of the newest instantaneous velocity sample, in `0..=1`.
    pub new_sample_weight: f32,
    /// Instantaneous speed gate before a sample is blended in, units/sec.
    pub min_sample_speed: f32,
    /// Release speeds below this settle immediately instead of decaying.
    pub min_fling_speed: f32,
    /// Velocity clamp applied at release, units/sec.
    pub max_speed: f32,
    /// Hard cap on decay duration, milliseconds.
    pub decay_duration_ms: i64,
    /// Decay multiplier while above the speed threshold.
    pub fast_decay_factor: f32,
    /// Speed threshold as a fraction of the release speed.
    pub speed_threshold_fraction: f32,
    /// Callback behavior for unchanged positions.
    pub notify_policy: NotifyPolicy,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: motion_constants::UPDATE_INTERVAL_MS,
            min_tick_interval_ms: motion_constants::MIN_TICK_INTERVAL_MS,
            new_sample_weight: motion_constants::NEW_SAMPLE_WEIGHT,
            min_sample_speed: motion_constants::MIN_SAMPLE_SPEED,
            min_fling_speed: motion_constants::MIN_FLING_SPEED,
            max_speed: motion_constants::MAX_SPEED,
            decay_duration_ms: motion_constants::DECAY_DURATION_MS,
            fast_decay_factor: motion_constants::FAST_DECAY_FACTOR,
            speed_threshold_fraction: motion_constants::SPEED_THRESHOLD_FRACTION,
            notify_policy: NotifyPolicy::Always,
        }
    }
}

impl MotionConfig {
    pub(crate) fn decay_duration_secs(&self) -> f32 {
        self.decay_duration_ms as f32 / 1000.0
    }
}
