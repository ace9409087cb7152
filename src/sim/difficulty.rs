//! Difficulty ramp: speed rises every `threshold` dodges

use serde::{Deserialize, Serialize};

/// Tracks dodges and the resulting speed multiplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyController {
    pub dodge_count: u32,
    pub speed_multiplier: f32,
    pub threshold: u32,
    pub increment: f32,
}

impl DifficultyController {
    pub fn new(threshold: u32, increment: f32) -> Self {
        Self {
            dodge_count: 0,
            speed_multiplier: 1.0,
            threshold: threshold.max(1),
            increment,
        }
    }

    /// Record one dodge and return the (possibly raised) multiplier.
    ///
    /// The count is bumped before the check, so the dodge that makes the
    /// count a multiple of `threshold` raises the speed on the same tick.
    pub fn on_dodge(&mut self) -> f32 {
        self.dodge_count += 1;
        if self.dodge_count.is_multiple_of(self.threshold) {
            self.speed_multiplier += self.increment;
        }
        self.speed_multiplier
    }

    /// Number of speed increases applied so far
    pub fn level(&self) -> u32 {
        self.dodge_count / self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifth_dodge_raises_speed() {
        let mut difficulty = DifficultyController::new(5, 0.1);
        for _ in 0..4 {
            assert_eq!(difficulty.on_dodge(), 1.0);
        }
        let raised = difficulty.on_dodge();
        assert!((raised - 1.1).abs() < 1e-6);
        assert_eq!(difficulty.dodge_count, 5);
        assert_eq!(difficulty.level(), 1);
    }

    #[test]
    fn test_raises_only_at_multiples() {
        let mut difficulty = DifficultyController::new(5, 0.1);
        let mut raised_at = Vec::new();
        let mut last = difficulty.speed_multiplier;
        for _ in 0..23 {
            let now = difficulty.on_dodge();
            assert!(now >= last);
            if now > last {
                raised_at.push(difficulty.dodge_count);
                assert!((now - last - 0.1).abs() < 1e-5);
            }
            last = now;
        }
        assert_eq!(raised_at, vec![5, 10, 15, 20]);
        assert_eq!(difficulty.level(), 4);
    }

    #[test]
    fn test_threshold_one_raises_every_dodge() {
        let mut difficulty = DifficultyController::new(1, 0.5);
        assert_eq!(difficulty.on_dodge(), 1.5);
        assert_eq!(difficulty.on_dodge(), 2.0);
    }
}
