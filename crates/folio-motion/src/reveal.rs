//! Scroll-triggered, one-shot entrance animations.
//!
//! A section registers one [`RevealRule`] per element group. Each rule is
//! watched through a trigger handle; when the handle's top edge crosses the
//! rule's viewport line, the group animates from its hidden state to its
//! visible state, optionally staggered.

use crate::easing::Ease;
use crate::tween::Tween;
use crate::visual::Visual;

/// Skill bars never grow past a full track.
pub const MAX_LEVEL: u8 = 100;
pub const SKILL_BAR_DURATION: f64 = 1.5;
pub const SKILL_BAR_STAGGER: f64 = 0.1;

/// Read-only view of element geometry supplied by the host.
pub trait Viewport<K> {
    fn height(&self) -> f64;
    /// Top edge of an element relative to the viewport top, or `None` when
    /// the element is not on the page.
    fn top_of(&self, handle: K) -> Option<f64>;
}

/// Fires when an element's top edge reaches a fraction of the viewport
/// height, measured from the top (`"top 80%"`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerStart {
    pub viewport_fraction: f64,
}

impl TriggerStart {
    pub const fn top(percent: f64) -> Self {
        Self {
            viewport_fraction: percent / 100.0,
        }
    }

    /// The line, in pixels from the viewport top, the element must reach
    pub fn line(&self, viewport_height: f64) -> f64 {
        viewport_height * self.viewport_fraction
    }

    pub fn is_crossed(&self, element_top: f64, viewport_height: f64) -> bool {
        element_top <= self.line(viewport_height)
    }
}

/// How one group of elements enters.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealRule {
    pub label: &'static str,
    pub start: TriggerStart,
    pub hidden: Visual,
    pub visible: Visual,
    pub duration: f64,
    /// Delay added per sibling
    pub stagger: f64,
    pub ease: Ease,
    /// Per-element target widths, for skill bars
    widths: Option<Vec<f64>>,
}

impl RevealRule {
    pub fn new(label: &'static str, start: TriggerStart, hidden: Visual, duration: f64) -> Self {
        Self {
            label,
            start,
            hidden,
            visible: Visual::IDENTITY,
            duration,
            stagger: 0.0,
            ease: Ease::Power2Out,
            widths: None,
        }
    }

    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Width bars that fill from 0 % to each level in turn.
    pub fn skill_bars(levels: &[u8]) -> Self {
        let widths = levels
            .iter()
            .map(|level| f64::from((*level).min(MAX_LEVEL)))
            .collect();
        Self {
            label: "skill bars",
            start: TriggerStart::top(80.0),
            hidden: Visual::IDENTITY.width(0.0),
            visible: Visual::IDENTITY.width(0.0),
            duration: SKILL_BAR_DURATION,
            stagger: SKILL_BAR_STAGGER,
            ease: Ease::Power2Out,
            widths: Some(widths),
        }
    }

    /// The tween for the element at `index` within the group.
    pub fn tween_for(&self, index: usize) -> Tween {
        let (from, to) = match &self.widths {
            Some(widths) => {
                let target = widths.get(index).copied().unwrap_or(0.0);
                (self.hidden, self.visible.width(target))
            }
            None => (self.hidden, self.visible),
        };
        Tween::new(from, to, self.duration)
            .delay(self.stagger * index as f64)
            .ease(self.ease)
    }

    /// Time from trigger until the last element settles, for `count` elements
    pub fn span(&self, count: usize) -> f64 {
        self.duration + self.stagger * count.saturating_sub(1) as f64
    }
}

/// Per-element reveal flag. One-shot: never resets once set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealState {
    pub triggered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(usize);

#[derive(Debug, Clone)]
struct Registration<K> {
    id: ObserverId,
    rule: RevealRule,
    trigger: K,
    /// Mounted elements with their position in the declared group
    elements: Vec<(usize, K)>,
    state: RevealState,
    elapsed: f64,
}

impl<K: Copy> Registration<K> {
    fn is_settled(&self) -> bool {
        let count = self.elements.last().map_or(0, |(i, _)| i + 1);
        self.state.triggered && self.elapsed >= self.rule.span(count)
    }

    fn sample(&self) -> impl Iterator<Item = (K, Visual)> + '_ {
        self.elements.iter().map(|(i, el)| {
            let tween = self.rule.tween_for(*i);
            let visual = if self.state.triggered {
                tween.sample(self.elapsed).visual
            } else {
                tween.from
            };
            (*el, visual)
        })
    }
}

/// Owns the reveal rules of one section and their observers.
#[derive(Debug, Clone)]
pub struct SectionRevealer<K> {
    registrations: Vec<Registration<K>>,
    next_id: usize,
    disposed: bool,
}

impl<K> Default for SectionRevealer<K> {
    fn default() -> Self {
        Self {
            registrations: Vec::new(),
            next_id: 0,
            disposed: false,
        }
    }
}

impl<K: Copy + PartialEq> SectionRevealer<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch `trigger` and reveal `elements` when it crosses the rule's line.
    ///
    /// Returns `None` without registering when the trigger is not on the page
    /// or the revealer has been disposed. Absent elements are dropped from
    /// the group; the rest keep their declared position for targets and
    /// stagger.
    pub fn register(
        &mut self,
        rule: RevealRule,
        trigger: K,
        elements: impl IntoIterator<Item = K>,
        viewport: &impl Viewport<K>,
    ) -> Option<ObserverId> {
        if self.disposed || viewport.top_of(trigger).is_none() {
            return None;
        }
        let elements = elements
            .into_iter()
            .enumerate()
            .filter(|(_, el)| viewport.top_of(*el).is_some())
            .collect();
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.registrations.push(Registration {
            id,
            rule,
            trigger,
            elements,
            state: RevealState::default(),
            elapsed: 0.0,
        });
        Some(id)
    }

    /// Check every untriggered rule against current geometry; returns the
    /// rules that fired now.
    pub fn observe(&mut self, viewport: &impl Viewport<K>) -> Vec<ObserverId> {
        let height = viewport.height();
        let mut fired = Vec::new();
        for reg in self.registrations.iter_mut().filter(|r| !r.state.triggered) {
            if let Some(top) = viewport.top_of(reg.trigger) {
                if reg.rule.start.is_crossed(top, height) {
                    reg.state.triggered = true;
                    fired.push(reg.id);
                }
            }
        }
        fired
    }

    /// Advance triggered rules and return the visual of every element.
    pub fn tick(&mut self, dt: f64) -> Vec<(K, Visual)> {
        let dt = dt.max(0.0);
        for reg in self.registrations.iter_mut().filter(|r| r.state.triggered) {
            reg.elapsed += dt;
        }
        self.registrations.iter().flat_map(|r| r.sample()).collect()
    }

    pub fn label_of(&self, id: ObserverId) -> Option<&'static str> {
        self.registrations
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.rule.label)
    }

    /// True when some triggered rule is still animating
    pub fn is_animating(&self) -> bool {
        self.registrations
            .iter()
            .any(|r| r.state.triggered && !r.is_settled())
    }

    /// True when every rule has fired and finished; nothing left to watch
    pub fn is_complete(&self) -> bool {
        self.registrations.iter().all(|r| r.is_settled())
    }

    pub fn observer_count(&self) -> usize {
        self.registrations.len()
    }

    /// Release every observer. A disposed revealer never fires again.
    pub fn dispose(&mut self) {
        self.registrations.clear();
        self.disposed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Handle {
        Grid,
        Card(usize),
        Missing,
    }

    struct FakeViewport {
        height: f64,
        tops: HashMap<Handle, f64>,
    }

    impl FakeViewport {
        fn new(height: f64) -> Self {
            Self {
                height,
                tops: HashMap::new(),
            }
        }

        fn place(&mut self, handle: Handle, top: f64) {
            self.tops.insert(handle, top);
        }
    }

    impl Viewport<Handle> for FakeViewport {
        fn height(&self) -> f64 {
            self.height
        }

        fn top_of(&self, handle: Handle) -> Option<f64> {
            self.tops.get(&handle).copied()
        }
    }

    fn cards_rule() -> RevealRule {
        RevealRule::new(
            "cards",
            TriggerStart::top(85.0),
            Visual::IDENTITY.opacity(0.0).y(80.0),
            1.0,
        )
        .stagger(0.15)
    }

    fn page() -> FakeViewport {
        let mut vp = FakeViewport::new(1000.0);
        vp.place(Handle::Grid, 1400.0);
        for i in 0..3 {
            vp.place(Handle::Card(i), 1400.0);
        }
        vp
    }

    #[test]
    fn test_trigger_line() {
        let start = TriggerStart::top(80.0);
        assert_eq!(start.line(1000.0), 800.0);
        assert!(start.is_crossed(800.0, 1000.0));
        assert!(!start.is_crossed(801.0, 1000.0));
    }

    #[test]
    fn test_hidden_until_crossed() {
        let mut vp = page();
        let mut revealer = SectionRevealer::new();
        let id = revealer
            .register(cards_rule(), Handle::Grid, (0..3).map(Handle::Card), &vp)
            .unwrap();
        assert!(revealer.observe(&vp).is_empty());
        let frame = revealer.tick(5.0);
        assert_eq!(frame.len(), 3);
        assert!(frame.iter().all(|(_, v)| v.opacity == 0.0));

        vp.place(Handle::Grid, 840.0);
        assert_eq!(revealer.observe(&vp), vec![id]);
        assert!(revealer.is_animating());
    }

    #[test]
    fn test_staggered_reveal_settles() {
        let mut vp = page();
        vp.place(Handle::Grid, 100.0);
        let mut revealer = SectionRevealer::new();
        revealer.register(cards_rule(), Handle::Grid, (0..3).map(Handle::Card), &vp);
        revealer.observe(&vp);

        let frame = revealer.tick(0.1);
        assert!(frame[0].1.opacity > 0.0);
        // Third card starts 0.3 s later
        assert_eq!(frame[2].1.opacity, 0.0);
        assert!(revealer.is_animating());

        let frame = revealer.tick(2.0);
        assert!(frame.iter().all(|(_, v)| *v == Visual::IDENTITY));
        assert!(!revealer.is_animating());
        assert!(revealer.is_complete());
    }

    #[test]
    fn test_one_shot() {
        let mut vp = page();
        vp.place(Handle::Grid, 100.0);
        let mut revealer = SectionRevealer::new();
        let id = revealer
            .register(cards_rule(), Handle::Grid, [Handle::Card(0)], &vp)
            .unwrap();
        assert_eq!(revealer.observe(&vp), vec![id]);
        revealer.tick(2.0);

        // Scroll away and back
        vp.place(Handle::Grid, 5000.0);
        assert!(revealer.observe(&vp).is_empty());
        vp.place(Handle::Grid, 100.0);
        assert!(revealer.observe(&vp).is_empty());
        assert_eq!(revealer.tick(0.1)[0].1, Visual::IDENTITY);
    }

    #[test]
    fn test_missing_trigger_is_skipped() {
        let vp = page();
        let mut revealer = SectionRevealer::new();
        let id = revealer.register(cards_rule(), Handle::Missing, [Handle::Card(0)], &vp);
        assert!(id.is_none());
        assert_eq!(revealer.observer_count(), 0);
        // Nothing of a skipped rule is hidden
        assert!(revealer.tick(0.0).is_empty());
    }

    #[test]
    fn test_missing_elements_are_dropped() {
        let vp = page();
        let mut revealer = SectionRevealer::new();
        revealer.register(
            cards_rule(),
            Handle::Grid,
            [Handle::Card(0), Handle::Missing],
            &vp,
        );
        assert_eq!(revealer.tick(0.0).len(), 1);
    }

    #[test]
    fn test_dispose_releases_observers() {
        let mut vp = page();
        let mut revealer = SectionRevealer::new();
        let id = revealer
            .register(cards_rule(), Handle::Grid, [Handle::Card(0)], &vp)
            .unwrap();
        assert_eq!(revealer.observer_count(), 1);
        revealer.dispose();
        assert_eq!(revealer.observer_count(), 0);
        assert_eq!(revealer.label_of(id), None);

        vp.place(Handle::Grid, 0.0);
        assert!(revealer.observe(&vp).is_empty());
        assert!(
            revealer
                .register(cards_rule(), Handle::Grid, [Handle::Card(0)], &vp)
                .is_none()
        );
    }

    #[test]
    fn test_bars_keep_their_own_level_when_one_is_missing() {
        let mut vp = FakeViewport::new(900.0);
        vp.place(Handle::Grid, 100.0);
        vp.place(Handle::Card(1), 100.0);
        vp.place(Handle::Card(3), 100.0);
        let mut revealer = SectionRevealer::new();
        revealer.register(
            RevealRule::skill_bars(&[90, 50, 20]),
            Handle::Grid,
            (1..=3).map(Handle::Card),
            &vp,
        );

        // Third bar waits for its own stagger slot
        revealer.observe(&vp);
        let frame = revealer.tick(0.15);
        assert_eq!(frame[1].0, Handle::Card(3));
        assert_eq!(frame[1].1.width_percent, Some(0.0));

        let frame = revealer.tick(10.0);
        let widths: Vec<(Handle, Option<f64>)> =
            frame.iter().map(|(h, v)| (*h, v.width_percent)).collect();
        assert_eq!(
            widths,
            vec![(Handle::Card(1), Some(90.0)), (Handle::Card(3), Some(20.0))]
        );
        assert!(revealer.is_complete());
    }

    #[test]
    fn test_not_complete_until_last_slot_settles() {
        let mut vp = page();
        vp.place(Handle::Grid, 100.0);
        let mut revealer = SectionRevealer::new();
        revealer.register(
            cards_rule(),
            Handle::Grid,
            [Handle::Missing, Handle::Missing, Handle::Card(2)],
            &vp,
        );
        revealer.observe(&vp);

        // Card 2 starts 0.3 s late, so 1.0 s in it is still moving
        revealer.tick(1.0);
        assert!(revealer.is_animating());
        revealer.tick(0.31);
        assert!(revealer.is_complete());
    }

    #[test]
    fn test_skill_bar_reaches_level_without_overshoot() {
        let mut vp = FakeViewport::new(900.0);
        vp.place(Handle::Grid, 700.0);
        vp.place(Handle::Card(0), 700.0);
        let mut revealer = SectionRevealer::new();
        revealer.register(
            RevealRule::skill_bars(&[87]),
            Handle::Grid,
            [Handle::Card(0)],
            &vp,
        );

        assert_eq!(revealer.tick(0.0)[0].1.width_percent, Some(0.0));
        revealer.observe(&vp);

        let mut last = 0.0;
        for _ in 0..200 {
            let width = revealer.tick(1.0 / 60.0)[0].1.width_percent.unwrap();
            assert!(width <= 87.0);
            assert!(width >= last);
            last = width;
        }
        assert_eq!(last, 87.0);
    }

    #[test]
    fn test_skill_bars_clamp_and_stagger() {
        let rule = RevealRule::skill_bars(&[95, 140]);
        assert_eq!(rule.tween_for(1).to.width_percent, Some(100.0));
        assert!((rule.tween_for(1).delay - 0.1).abs() < 1e-9);
        assert!((rule.span(8) - 2.2).abs() < 1e-9);
    }
}
