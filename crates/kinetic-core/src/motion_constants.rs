//! Default tuning constants for kinetic motion.
//!
//! These values are in abstract "units" (whatever the host maps the axis
//! to: pixels, list offset, slider fraction) and seconds/milliseconds.
//! They are defaults for [`crate::MotionConfig`], not hard-wired truths;
//! hosts that need a different feel should override the config rather
//! than edit this module.

/// Periodic tick cadence in milliseconds.
///
/// ~66 Hz: fast enough that velocity samples track a finger closely,
/// slow enough that per-tick work is negligible. Drivers schedule at this
/// rate; the physics itself is elapsed-time based and tolerates jitter.
pub const UPDATE_INTERVAL_MS: i64 = 15;

/// Minimum resolvable interval between samples, in milliseconds.
///
/// Ticks arriving closer together than this are ignored. Dividing a
/// position delta by a near-zero interval produces wildly noisy (or
/// infinite) instantaneous velocities, so too-fast ticks lose accuracy
/// rather than add it.
pub const MIN_TICK_INTERVAL_MS: i64 = 5;

/// Exponential-moving-average weight of the newest velocity sample.
///
/// A steep blend: the newest instantaneous velocity dominates, with a
/// small memory of previous samples to smooth out single-tick jitter.
pub const NEW_SAMPLE_WEIGHT: f32 = 0.8;

/// Instantaneous speeds at or below this magnitude (units/sec) are not
/// blended into the velocity estimate. A resting pointer still produces
/// ticks; sub-unit noise must not erode a real velocity estimate.
pub const MIN_SAMPLE_SPEED: f32 = 1.0;

/// Minimum release speed (units/sec) that triggers a decay animation.
/// Below this the value just stops where it is.
pub const MIN_FLING_SPEED: f32 = 1.0;

/// Release speed cap in units/sec. Velocity estimates beyond this are
/// clamped at release so a single noisy sample cannot launch the value
/// across the whole range.
pub const MAX_SPEED: f32 = 8_000.0;

/// Hard cap on the decay phase duration, in milliseconds.
///
/// The deceleration is derived from the release speed so decay normally
/// settles well inside this window; the cap guarantees termination even
/// for pathological tuning overrides.
pub const DECAY_DURATION_MS: i64 = 3_000;

/// Extra decay multiplier applied while the speed is still above the
/// release threshold. Large velocities bleed off quickly, then the tail
/// of the motion eases out gently.
pub const FAST_DECAY_FACTOR: f32 = 4.0;

/// Fraction of the release speed below which decay drops to its gentle
/// rate.
pub const SPEED_THRESHOLD_FRACTION: f32 = 0.33;
