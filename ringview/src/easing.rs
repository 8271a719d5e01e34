/// Ease-out curves used by the scroll animator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    OutCubic,
    OutExpo,
}

impl Easing {
    /// Durations above this use [`Easing::OutExpo`].
    pub const EXPO_THRESHOLD_MS: u64 = 370;

    /// Cubic ease-out for short animations, exponential ease-out for long ones.
    pub fn for_duration(duration_ms: u64) -> Self {
        if duration_ms > Self::EXPO_THRESHOLD_MS {
            Self::OutExpo
        } else {
            Self::OutCubic
        }
    }

    /// Maps progress `t` in `0..=1` to eased progress. `sample(1.0)` is exactly `1.0`.
    pub fn sample(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::OutCubic => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Self::OutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.001 * (1.0 - 2f64.powf(-10.0 * t))
                }
            }
        }
    }
}
