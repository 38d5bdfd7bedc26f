use crate::tween::{Repeat, Tween};
use crate::visual::Visual;

/// An endless, cancellable loop over a group of targets.
///
/// Used for ambient motion (floating orbs, particles). The owning component
/// cancels it on unmount; a cancelled task produces no more visuals.
#[derive(Debug, Clone)]
pub struct RepeatingTask<K> {
    targets: Vec<K>,
    tween: Tween,
    stagger: f64,
    elapsed: f64,
    cancelled: bool,
}

impl<K: Copy> RepeatingTask<K> {
    /// `tween` is forced to repeat forever with yoyo.
    pub fn new(targets: Vec<K>, tween: Tween, stagger: f64) -> Self {
        Self {
            targets,
            tween: tween.repeat(Repeat::Forever).yoyo(true),
            stagger: stagger.max(0.0),
            elapsed: 0.0,
            cancelled: false,
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn tick(&mut self, dt: f64) -> Vec<(K, Visual)> {
        if self.cancelled {
            return Vec::new();
        }
        self.elapsed += dt.max(0.0);
        self.targets
            .iter()
            .enumerate()
            .map(|(i, target)| {
                let local = self.elapsed - self.stagger * i as f64;
                (*target, self.tween.sample(local).visual)
            })
            .collect()
    }
}
