//! Per-component animation ownership.
//!
//! Every component that animates creates its own controller on mount and
//! cancels it on unmount. The owner can only play, reverse or cancel; the
//! frame clock advances it with [`AnimationController::tick`].

use crate::timeline::Timeline;
use crate::tween::Tween;
use crate::visual::Visual;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// Created but not started; renders the initial state
    Idle,
    Playing,
    Reversing,
    /// Reached either end and stopped
    Settled,
    Cancelled,
}

/// Visuals produced by one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<K> {
    pub visuals: Vec<(K, Visual)>,
    /// Nothing left to animate until the owner plays or reverses again
    pub settled: bool,
}

impl<K> Frame<K> {
    pub fn empty() -> Self {
        Self {
            visuals: Vec::new(),
            settled: true,
        }
    }

    /// Visual for a single target, if the frame has one
    pub fn get(&self, target: K) -> Option<Visual>
    where
        K: PartialEq,
    {
        self.visuals
            .iter()
            .find(|(k, _)| *k == target)
            .map(|(_, v)| *v)
    }
}

#[derive(Debug, Clone)]
pub struct AnimationController<K> {
    timeline: Timeline<K>,
    playhead: f64,
    playback: Playback,
}

impl<K: Copy + PartialEq> AnimationController<K> {
    pub fn new(timeline: Timeline<K>) -> Self {
        Self {
            timeline,
            playhead: 0.0,
            playback: Playback::Idle,
        }
    }

    /// Controller over a single tween, already playing
    pub fn playing(target: K, tween: Tween) -> Self {
        let mut controller = Self::new(Timeline::single(target, tween));
        controller.play();
        controller
    }

    /// Run forward from the current playhead. No effect once cancelled.
    pub fn play(&mut self) {
        if self.playback != Playback::Cancelled {
            self.playback = Playback::Playing;
        }
    }

    /// Run backward towards the start. No effect once cancelled.
    pub fn reverse(&mut self) {
        if self.playback != Playback::Cancelled {
            self.playback = Playback::Reversing;
        }
    }

    /// Stop for good; later ticks produce nothing.
    pub fn cancel(&mut self) {
        self.playback = Playback::Cancelled;
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn playhead(&self) -> f64 {
        self.playhead
    }

    pub fn is_running(&self) -> bool {
        matches!(self.playback, Playback::Playing | Playback::Reversing)
    }

    pub fn timeline(&self) -> &Timeline<K> {
        &self.timeline
    }

    /// Advance by `dt` seconds and sample.
    pub fn tick(&mut self, dt: f64) -> Frame<K> {
        let dt = dt.max(0.0);
        let duration = self.timeline.duration();
        match self.playback {
            Playback::Cancelled => return Frame::empty(),
            Playback::Playing => {
                self.playhead = (self.playhead + dt).min(duration);
                if self.playhead >= duration {
                    self.playback = Playback::Settled;
                }
            }
            Playback::Reversing => {
                self.playhead = (self.playhead - dt).max(0.0);
                if self.playhead <= 0.0 {
                    self.playback = Playback::Settled;
                }
            }
            Playback::Idle | Playback::Settled => {}
        }

        Frame {
            visuals: self.timeline.sample(self.playhead),
            settled: !self.is_running(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Ease;

    fn controller() -> AnimationController<u8> {
        let tween = Tween::new(Visual::IDENTITY.opacity(0.0), Visual::IDENTITY, 1.0).ease(Ease::Linear);
        AnimationController::new(Timeline::single(0, tween))
    }

    #[test]
    fn test_idle_renders_initial_state() {
        let mut c = controller();
        let frame = c.tick(5.0);
        assert!(frame.settled);
        assert_eq!(frame.get(0).unwrap().opacity, 0.0);
        assert_eq!(c.playhead(), 0.0);
    }

    #[test]
    fn test_play_settles_at_end() {
        let mut c = controller();
        c.play();
        let frame = c.tick(0.4);
        assert!(!frame.settled);
        assert!((frame.get(0).unwrap().opacity - 0.4).abs() < 1e-9);
        let frame = c.tick(1.0);
        assert!(frame.settled);
        assert_eq!(c.playback(), Playback::Settled);
        assert_eq!(frame.get(0).unwrap().opacity, 1.0);
    }

    #[test]
    fn test_reverse_returns_to_start() {
        let mut c = controller();
        c.play();
        c.tick(0.6);
        c.reverse();
        let frame = c.tick(0.2);
        assert!((frame.get(0).unwrap().opacity - 0.4).abs() < 1e-9);
        let frame = c.tick(1.0);
        assert!(frame.settled);
        assert_eq!(frame.get(0).unwrap().opacity, 0.0);
    }

    #[test]
    fn test_cancel_is_final() {
        let mut c = controller();
        c.play();
        c.tick(0.5);
        c.cancel();
        assert_eq!(c.playback(), Playback::Cancelled);
        assert_eq!(c.tick(0.1), Frame::empty());
        c.play();
        c.reverse();
        assert_eq!(c.playback(), Playback::Cancelled);
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut c = controller();
        c.play();
        c.tick(0.5);
        c.tick(-3.0);
        assert_eq!(c.playhead(), 0.5);
    }
}
