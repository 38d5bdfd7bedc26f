use crate::easing::Ease;
use crate::visual::Visual;

/// How many extra iterations a tween plays after the first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Count(u32),
    Forever,
}

/// A single interpolation between two visuals.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub from: Visual,
    pub to: Visual,
    /// Seconds per iteration
    pub duration: f64,
    /// Seconds before the first iteration starts
    pub delay: f64,
    pub ease: Ease,
    pub repeat: Repeat,
    /// Alternate iterations run backwards
    pub yoyo: bool,
}

/// The state of a tween at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSample {
    pub visual: Visual,
    /// Linear time progress through the current iteration, `[0, 1]`
    pub progress: f64,
    pub finished: bool,
}

impl Tween {
    pub fn new(from: Visual, to: Visual, duration: f64) -> Self {
        Self {
            from,
            to,
            duration,
            delay: 0.0,
            ease: Ease::Power2Out,
            repeat: Repeat::Count(0),
            yoyo: false,
        }
    }

    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Time spent animating, excluding the delay. `None` for endless tweens.
    pub fn active_duration(&self) -> Option<f64> {
        match self.repeat {
            Repeat::Count(n) => Some(self.duration.max(0.0) * f64::from(n + 1)),
            Repeat::Forever => None,
        }
    }

    /// Delay plus active duration. `None` for endless tweens.
    pub fn total_duration(&self) -> Option<f64> {
        self.active_duration().map(|d| d + self.delay.max(0.0))
    }

    /// Sample the tween `elapsed` seconds after it was started.
    pub fn sample(&self, elapsed: f64) -> TweenSample {
        let local = elapsed - self.delay;
        if local < 0.0 {
            return TweenSample {
                visual: self.from,
                progress: 0.0,
                finished: false,
            };
        }

        if self.duration <= 0.0 {
            return TweenSample {
                visual: self.to,
                progress: 1.0,
                finished: true,
            };
        }

        let last_iteration = match self.repeat {
            Repeat::Count(n) if local >= self.duration * f64::from(n + 1) => Some(u64::from(n)),
            _ => None,
        };
        let (iteration, t, finished) = match last_iteration {
            Some(n) => (n, 1.0, true),
            None => {
                let iteration = (local / self.duration).floor();
                let t = (local - iteration * self.duration) / self.duration;
                (iteration as u64, t, false)
            }
        };

        let reversed = self.yoyo && iteration % 2 == 1;
        let eased = if reversed {
            self.ease.apply(1.0 - t)
        } else {
            self.ease.apply(t)
        };

        TweenSample {
            visual: self.from.lerp(&self.to, eased),
            progress: t,
            finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade() -> Tween {
        Tween::new(Visual::IDENTITY.opacity(0.0), Visual::IDENTITY, 1.0).ease(Ease::Linear)
    }

    #[test]
    fn test_before_delay_holds_from() {
        let tween = fade().delay(0.5);
        let sample = tween.sample(0.25);
        assert_eq!(sample.visual.opacity, 0.0);
        assert_eq!(sample.progress, 0.0);
        assert!(!sample.finished);
    }

    #[test]
    fn test_progress_is_linear_time() {
        let tween = fade().ease(Ease::Power2Out);
        let sample = tween.sample(0.5);
        assert!((sample.progress - 0.5).abs() < 1e-9);
        // Eased value runs ahead of time progress
        assert!(sample.visual.opacity > 0.5);
    }

    #[test]
    fn test_finishes_at_end_value() {
        let sample = fade().sample(3.0);
        assert!(sample.finished);
        assert_eq!(sample.progress, 1.0);
        assert_eq!(sample.visual.opacity, 1.0);
    }

    #[test]
    fn test_total_duration_counts_repeats_and_delay() {
        let tween = fade().delay(0.2).repeat(Repeat::Count(2));
        assert_eq!(tween.active_duration(), Some(3.0));
        assert_eq!(tween.total_duration(), Some(3.2));
        assert_eq!(fade().repeat(Repeat::Forever).total_duration(), None);
    }

    #[test]
    fn test_yoyo_runs_back() {
        let tween = fade().repeat(Repeat::Count(1)).yoyo(true);
        assert!((tween.sample(0.75).visual.opacity - 0.75).abs() < 1e-9);
        assert!((tween.sample(1.25).visual.opacity - 0.75).abs() < 1e-9);
        let end = tween.sample(2.0);
        assert!(end.finished);
        assert_eq!(end.visual.opacity, 0.0);
    }

    #[test]
    fn test_odd_yoyo_count_ends_forward() {
        // Three half cycles: up, down, up
        let tween = fade().repeat(Repeat::Count(2)).yoyo(true);
        assert_eq!(tween.sample(10.0).visual.opacity, 1.0);
    }

    #[test]
    fn test_forever_never_finishes() {
        let tween = fade().repeat(Repeat::Forever).yoyo(true);
        let sample = tween.sample(1001.5);
        assert!(!sample.finished);
        assert!((sample.visual.opacity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_duration_jumps_to_end() {
        let tween = Tween::new(Visual::IDENTITY.opacity(0.0), Visual::IDENTITY, 0.0);
        let sample = tween.sample(0.0);
        assert!(sample.finished);
        assert_eq!(sample.visual.opacity, 1.0);
    }
}
