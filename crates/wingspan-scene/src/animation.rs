//! Cyclic animation time.

use std::f64::consts::TAU;

/// Length of one animation cycle in milliseconds.
pub const DEFAULT_CYCLE_MS: u64 = 10_000;

/// Position within the animation cycle, in `[0, 1)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct AnimationPhase(f64);

impl AnimationPhase {
    pub const ZERO: Self = Self(0.0);

    /// Wrap any finite value into `[0, 1)`.
    pub fn new(value: f64) -> Self {
        let wrapped = value.rem_euclid(1.0);
        // rem_euclid rounds tiny negative inputs up to exactly 1.0
        Self(if wrapped >= 1.0 { 0.0 } else { wrapped })
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// `amplitude * -sin(2*PI * cycles * phase)`: starts at zero and swings
    /// negative first, completing `cycles` full swings per animation cycle.
    pub fn oscillate(self, amplitude: f64, cycles: f64) -> f64 {
        amplitude * -(TAU * cycles * self.0).sin()
    }
}

/// Millisecond clock that wraps every `cycle_ms` and can be frozen.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    cycle_ms: u64,
    elapsed_ms: u64,
    frozen: bool,
}

impl AnimationClock {
    /// A cycle length of zero is treated as one millisecond.
    pub fn new(cycle_ms: u64) -> Self {
        Self {
            cycle_ms: cycle_ms.max(1),
            elapsed_ms: 0,
            frozen: false,
        }
    }

    pub fn cycle_ms(&self) -> u64 {
        self.cycle_ms
    }

    /// Phase corresponding to an absolute elapsed time.
    pub fn phase_at(&self, elapsed_ms: u64) -> AnimationPhase {
        AnimationPhase((elapsed_ms % self.cycle_ms) as f64 / self.cycle_ms as f64)
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase_at(self.elapsed_ms)
    }

    /// Move forward by `step_ms` unless frozen, and return the new phase.
    pub fn advance(&mut self, step_ms: u64) -> AnimationPhase {
        if !self.frozen {
            self.elapsed_ms = (self.elapsed_ms + step_ms % self.cycle_ms) % self.cycle_ms;
        }
        self.phase()
    }

    /// Jump to a wall-clock reading, e.g. milliseconds since start-up.
    pub fn sync(&mut self, elapsed_ms: u64) -> AnimationPhase {
        if !self.frozen {
            self.elapsed_ms = elapsed_ms % self.cycle_ms;
        }
        self.phase()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    pub fn toggle_freeze(&mut self) -> bool {
        self.frozen = !self.frozen;
        self.frozen
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(DEFAULT_CYCLE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_phase_wraps() {
        assert_eq!(AnimationPhase::new(1.25).value(), 0.25);
        assert_eq!(AnimationPhase::new(-0.25).value(), 0.75);
        assert_eq!(AnimationPhase::new(1.0).value(), 0.0);
        assert_eq!(AnimationPhase::new(-1e-20).value(), 0.0);
    }

    #[test]
    fn test_oscillate() {
        assert_abs_diff_eq!(AnimationPhase::new(0.0).oscillate(0.25, 2.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(AnimationPhase::new(0.125).oscillate(0.25, 2.0), -0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(AnimationPhase::new(0.375).oscillate(0.25, 2.0), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_phase_at_uses_cycle() {
        let clock = AnimationClock::default();
        assert_eq!(clock.phase_at(2_500).value(), 0.25);
        assert_eq!(clock.phase_at(12_500).value(), 0.25);
        assert_eq!(clock.phase_at(10_000).value(), 0.0);
    }

    #[test]
    fn test_advance_wraps_and_freezes() {
        let mut clock = AnimationClock::new(100);
        for _ in 0..99 {
            clock.advance(1);
        }
        assert_abs_diff_eq!(clock.phase().value(), 0.99, epsilon = 1e-12);
        assert_eq!(clock.advance(1), AnimationPhase::ZERO);

        clock.advance(30);
        assert!(clock.toggle_freeze());
        assert_eq!(clock.advance(10).value(), 0.3);
        assert_eq!(clock.sync(55).value(), 0.3);
        clock.set_frozen(false);
        assert_eq!(clock.advance(250).value(), 0.8);
        assert_eq!(clock.sync(1_234).value(), 0.34);
    }

    #[test]
    fn test_zero_cycle_is_clamped() {
        let mut clock = AnimationClock::new(0);
        assert_eq!(clock.cycle_ms(), 1);
        assert_eq!(clock.advance(5), AnimationPhase::ZERO);
    }
}
