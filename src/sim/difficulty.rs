//! Score to level and tick interval mapping

use std::time::Duration;

use crate::consts::*;

/// Level and speed progression derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyCurve {
    /// Points per level
    pub level_threshold: u32,
    /// Tick interval at level 1
    pub base_interval_ms: u64,
    /// Interval reduction per level
    pub step_ms: u64,
    /// Interval floor
    pub min_interval_ms: u64,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            level_threshold: LEVEL_THRESHOLD,
            base_interval_ms: BASE_INTERVAL_MS,
            step_ms: INTERVAL_STEP_MS,
            min_interval_ms: MIN_INTERVAL_MS,
        }
    }
}

impl DifficultyCurve {
    /// `floor(score / threshold) + 1`
    pub fn level(&self, score: u32) -> u32 {
        (score / self.level_threshold.max(1)).saturating_add(1)
    }

    /// Tick interval for a level, floored at the minimum
    pub fn interval(&self, level: u32) -> Duration {
        let cut = u64::from(level.saturating_sub(1)).saturating_mul(self.step_ms);
        let ms = self.base_interval_ms.saturating_sub(cut).max(self.min_interval_ms);
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        let curve = DifficultyCurve::default();
        assert_eq!(curve.level(0), 1);
        assert_eq!(curve.level(40), 1);
        assert_eq!(curve.level(50), 2);
        assert_eq!(curve.level(149), 3);
    }

    #[test]
    fn test_level_at_max_score() {
        let curve = DifficultyCurve {
            level_threshold: 1,
            ..Default::default()
        };
        assert_eq!(curve.level(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_interval_steps_then_floors() {
        let curve = DifficultyCurve::default();
        assert_eq!(curve.interval(1), Duration::from_millis(200));
        assert_eq!(curve.interval(2), Duration::from_millis(180));
        assert_eq!(curve.interval(8), Duration::from_millis(60));
        assert_eq!(curve.interval(9), Duration::from_millis(50));
        assert_eq!(curve.interval(1000), Duration::from_millis(50));
        assert_eq!(curve.interval(u32::MAX), Duration::from_millis(50));
    }

    #[test]
    fn test_interval_monotonic() {
        let curve = DifficultyCurve::default();
        for level in 1..40 {
            assert!(curve.interval(level + 1) <= curve.interval(level));
        }
    }
}
