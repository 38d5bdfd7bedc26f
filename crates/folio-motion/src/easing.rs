use std::fmt;

/// Overshoot used by every `back.out` curve on the site.
pub const BACK_OVERSHOOT: f64 = 1.7;

/// Easing curves used by the site's choreography.
///
/// Names follow the `powerN` family: `Power1` is quadratic, `Power2` cubic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    Linear,
    Power1InOut,
    Power2In,
    Power2Out,
    Power2InOut,
    /// Decelerates past the target, then settles back onto it
    BackOut(f64),
}

impl Ease {
    /// Map linear time progress to eased progress.
    ///
    /// Input is clamped to `[0, 1]`. Every curve maps 0 to 0 and 1 to 1;
    /// `BackOut` exceeds 1 in between.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Ease::Power2In => t * t * t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::BackOut(c) => {
                let u = t - 1.0;
                1.0 + (c + 1.0) * u.powi(3) + c * u.powi(2)
            }
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ease::Linear => write!(f, "none"),
            Ease::Power1InOut => write!(f, "power1.inOut"),
            Ease::Power2In => write!(f, "power2.in"),
            Ease::Power2Out => write!(f, "power2.out"),
            Ease::Power2InOut => write!(f, "power2.inOut"),
            Ease::BackOut(c) => write!(f, "back.out({})", c),
        }
    }
}
