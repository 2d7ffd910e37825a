//! The bounded health score.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An engagement counter in `[0, 100]`.
///
/// Only ever raised, and saturates at [`HealthScore::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthScore(u8);

impl HealthScore {
    pub const MAX: u8 = 100;

    /// Construct a score, clamping values above `MAX`.
    pub fn new(value: u8) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Raise by `delta`, clamped at `MAX`.
    pub fn raise(&mut self, delta: u8) {
        self.0 = self.0.saturating_add(delta).min(Self::MAX);
    }
}

impl Default for HealthScore {
    fn default() -> Self {
        Self(85)
    }
}

impl fmt::Display for HealthScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::HealthScore;

    #[test]
    fn new_clamps_above_max() {
        assert_eq!(HealthScore::new(140).value(), 100);
        assert_eq!(HealthScore::new(0).value(), 0);
    }

    #[test]
    fn raise_saturates_at_max() {
        let mut score = HealthScore::new(99);
        score.raise(2);
        assert_eq!(score.value(), 100);
        score.raise(u8::MAX);
        assert_eq!(score.value(), 100);
    }

    #[test]
    fn default_is_85() {
        assert_eq!(HealthScore::default().value(), 85);
    }
}
