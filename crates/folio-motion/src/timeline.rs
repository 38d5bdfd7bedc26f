use crate::tween::{Tween, TweenSample};
use crate::visual::Visual;

/// Where a step is placed relative to the steps already on the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// At the current end of the timeline
    Sequential,
    /// At the same start as the previously added step (`"<"`)
    WithPrevious,
    /// This many seconds before the current end (`"-=secs"`)
    Overlap(f64),
    /// At an absolute offset from the timeline start
    At(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step<K> {
    pub target: K,
    pub tween: Tween,
    /// Seconds from the timeline start, excluding the timeline delay
    pub start: f64,
}

/// An ordered sequence of tweens, some overlapping, against keyed targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<K> {
    steps: Vec<Step<K>>,
    delay: f64,
    end: f64,
}

impl<K> Default for Timeline<K> {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            delay: 0.0,
            end: 0.0,
        }
    }
}

impl<K: Copy + PartialEq> Timeline<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeline whose first step starts after `delay` seconds
    pub fn with_delay(delay: f64) -> Self {
        Self {
            delay: delay.max(0.0),
            ..Self::default()
        }
    }

    /// A timeline holding a single tween
    pub fn single(target: K, tween: Tween) -> Self {
        let mut timeline = Self::new();
        timeline.add(target, tween, Position::Sequential);
        timeline
    }

    fn resolve(&self, position: Position) -> f64 {
        match position {
            Position::Sequential => self.end,
            Position::WithPrevious => self.steps.last().map_or(0.0, |s| s.start),
            Position::Overlap(secs) => (self.end - secs).max(0.0),
            Position::At(at) => at.max(0.0),
        }
    }

    fn push(&mut self, target: K, tween: Tween, start: f64) -> usize {
        // Endless steps never extend the timeline
        if let Some(total) = tween.total_duration() {
            self.end = self.end.max(start + total);
        }
        self.steps.push(Step {
            target,
            tween,
            start,
        });
        self.steps.len() - 1
    }

    /// Append a step and return its index.
    pub fn add(&mut self, target: K, tween: Tween, position: Position) -> usize {
        let start = self.resolve(position);
        self.push(target, tween, start)
    }

    /// Start of a step including the timeline delay
    pub fn step_start(&self, index: usize) -> Option<f64> {
        self.steps.get(index).map(|s| self.delay + s.start)
    }

    /// Total length including the start delay
    pub fn duration(&self) -> f64 {
        self.delay + self.end
    }

    /// Sample a single step at timeline time `t`.
    pub fn step_sample(&self, index: usize, t: f64) -> Option<TweenSample> {
        self.steps
            .get(index)
            .map(|s| s.tween.sample(t - self.delay - s.start))
    }

    /// Visual of every target at timeline time `t`.
    ///
    /// A target shows the latest step that has started; before its first step
    /// it holds that step's `from` state.
    pub fn sample(&self, t: f64) -> Vec<(K, Visual)> {
        let local = t - self.delay;
        let mut out: Vec<(K, Visual)> = Vec::new();

        for step in &self.steps {
            let started = local >= step.start;
            match out.iter_mut().find(|(k, _)| *k == step.target) {
                Some(entry) => {
                    if started {
                        entry.1 = step.tween.sample(local - step.start).visual;
                    }
                }
                None => {
                    let visual = if started {
                        step.tween.sample(local - step.start).visual
                    } else {
                        step.tween.from
                    };
                    out.push((step.target, visual));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Ease;
    use crate::tween::Repeat;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Part {
        A,
        B,
        C,
    }

    fn fade(duration: f64) -> Tween {
        Tween::new(Visual::IDENTITY.opacity(0.0), Visual::IDENTITY, duration).ease(Ease::Linear)
    }

    #[test]
    fn test_sequential_placement() {
        let mut tl = Timeline::new();
        tl.add(Part::A, fade(1.0), Position::Sequential);
        let b = tl.add(Part::B, fade(0.5), Position::Sequential);
        assert_eq!(tl.step_start(b), Some(1.0));
        assert_eq!(tl.duration(), 1.5);
    }

    #[test]
    fn test_overlap_and_with_previous() {
        // Mirrors the hero entrance: 1.2, then -0.8, then -0.6, then -1
        let mut tl = Timeline::with_delay(4.0);
        tl.add(Part::A, fade(1.2), Position::Sequential);
        let b = tl.add(Part::B, fade(1.0), Position::Overlap(0.8));
        let c = tl.add(Part::C, fade(1.0), Position::WithPrevious);
        assert!((tl.step_start(b).unwrap() - 4.4).abs() < 1e-9);
        assert_eq!(tl.step_start(c), tl.step_start(b));
        assert!((tl.duration() - 5.4).abs() < 1e-9);
    }

    #[test]
    fn test_unstarted_targets_hold_initial_state() {
        let mut tl = Timeline::new();
        tl.add(Part::A, fade(1.0), Position::Sequential);
        tl.add(Part::B, fade(1.0), Position::Sequential);
        let frame = tl.sample(0.5);
        assert_eq!(frame.len(), 2);
        assert_eq!(frame[1], (Part::B, Visual::IDENTITY.opacity(0.0)));
    }

    #[test]
    fn test_later_step_overrides_earlier_for_same_target() {
        let mut tl = Timeline::new();
        tl.add(Part::A, fade(1.0), Position::Sequential);
        let grow = Tween::new(Visual::IDENTITY, Visual::IDENTITY.scale(2.0), 1.0).ease(Ease::Linear);
        tl.add(Part::A, grow, Position::Sequential);
        let frame = tl.sample(1.5);
        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0].1.scale, 1.5);
        assert_eq!(frame[0].1.opacity, 1.0);
    }

    #[test]
    fn test_endless_steps_do_not_extend_duration() {
        let mut tl = Timeline::new();
        tl.add(Part::A, fade(1.0), Position::Sequential);
        tl.add(Part::B, fade(1.0).repeat(Repeat::Forever), Position::WithPrevious);
        assert_eq!(tl.duration(), 1.0);
    }
}
