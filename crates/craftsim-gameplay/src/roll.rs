//! Random source for craft outcomes.

/// Source of uniform draws in `[0, 1)`.
pub trait OutcomeRoll {
    /// Draws the next value.
    fn roll(&mut self) -> f64;
}

impl OutcomeRoll for fastrand::Rng {
    fn roll(&mut self) -> f64 {
        self.f64()
    }
}

/// Always returns the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRoll(pub f64);

impl OutcomeRoll for FixedRoll {
    fn roll(&mut self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rolls_repeat() {
        let mut a = fastrand::Rng::with_seed(7);
        let mut b = fastrand::Rng::with_seed(7);
        for _ in 0..16 {
            let value = a.roll();
            assert!((0.0..1.0).contains(&value));
            assert_eq!(value.to_bits(), b.roll().to_bits());
        }
    }

    #[test]
    fn test_fixed_roll() {
        let mut roll = FixedRoll(0.5);
        assert_eq!(roll.roll().to_bits(), 0.5f64.to_bits());
    }
}
