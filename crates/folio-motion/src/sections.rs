//! Choreography of each page section.

use crate::easing::{BACK_OVERSHOOT, Ease};
use crate::repeating::RepeatingTask;
use crate::reveal::{RevealRule, TriggerStart};
use crate::timeline::{Position, Timeline};
use crate::tween::Tween;
use crate::visual::Visual;

/// The hero waits for the loading gate to clear
pub const HERO_DELAY: f64 = 4.0;
pub const PAGE_FADE_DURATION: f64 = 1.0;
pub const CTA_HOVER_SCALE: f64 = 1.05;
pub const CTA_HOVER_DURATION: f64 = 0.3;

const RISE: Visual = Visual::IDENTITY.opacity(0.0).y(60.0).blur(10.0);
const RISE_SOFT: Visual = Visual::IDENTITY.opacity(0.0).y(60.0).blur(5.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeroPart {
    Title,
    Subtitle,
    Cta,
    Card,
}

/// Title, then subtitle, button and 3D card overlapping in
pub fn hero_timeline() -> Timeline<HeroPart> {
    let enter = |duration| Tween::new(RISE, Visual::IDENTITY, duration).ease(Ease::Power2Out);
    let card = Tween::new(
        Visual::IDENTITY.opacity(0.0).x(200.0).scale(0.8),
        Visual::IDENTITY,
        1.5,
    )
    .ease(Ease::Power2Out);

    let mut timeline = Timeline::with_delay(HERO_DELAY);
    timeline.add(HeroPart::Title, enter(1.2), Position::Sequential);
    timeline.add(HeroPart::Subtitle, enter(1.0), Position::Overlap(0.8));
    timeline.add(HeroPart::Cta, enter(1.0), Position::Overlap(0.6));
    timeline.add(HeroPart::Card, card, Position::Overlap(1.0));
    timeline
}

/// Slow vertical drift of the hero background orbs
pub fn hero_orbs<K: Copy>(orbs: Vec<K>) -> RepeatingTask<K> {
    let tween = Tween::new(Visual::IDENTITY, Visual::IDENTITY.y(-20.0), 3.0).ease(Ease::Power1InOut);
    RepeatingTask::new(orbs, tween, 0.5)
}

/// Hover grow or shrink of the hero button, starting from its current look
pub fn cta_hover(current: Visual, hovered: bool) -> Tween {
    let scale = if hovered { CTA_HOVER_SCALE } else { 1.0 };
    Tween::new(current, current.scale(scale), CTA_HOVER_DURATION).ease(Ease::Power2Out)
}

/// Fade of the assembled page once loading is done
pub fn page_fade() -> Tween {
    Tween::new(Visual::IDENTITY.opacity(0.0), Visual::IDENTITY, PAGE_FADE_DURATION).ease(Ease::Power2Out)
}

pub fn about_image() -> RevealRule {
    RevealRule::new(
        "about image",
        TriggerStart::top(70.0),
        Visual::IDENTITY.opacity(0.0).x(-100.0).scale(0.8).blur(10.0),
        1.2,
    )
}

pub fn about_content() -> RevealRule {
    RevealRule::new("about content", TriggerStart::top(80.0), RISE_SOFT, 1.0).stagger(0.2)
}

pub fn skill_cards() -> RevealRule {
    RevealRule::new(
        "skill cards",
        TriggerStart::top(85.0),
        Visual::IDENTITY.opacity(0.0).y(30.0).scale(0.8),
        0.6,
    )
    .stagger(0.1)
    .ease(Ease::BackOut(BACK_OVERSHOOT))
}

pub fn skill_bars(levels: &[u8]) -> RevealRule {
    RevealRule::skill_bars(levels)
}

pub fn projects_title() -> RevealRule {
    RevealRule::new("projects title", TriggerStart::top(80.0), RISE, 1.2)
}

pub fn project_cards() -> RevealRule {
    RevealRule::new(
        "project cards",
        TriggerStart::top(85.0),
        Visual::IDENTITY.opacity(0.0).y(80.0).scale(0.8).blur(5.0),
        1.0,
    )
    .stagger(0.15)
}

pub fn contact_title() -> RevealRule {
    RevealRule::new("contact title", TriggerStart::top(80.0), RISE, 1.2)
}

pub fn contact_fields() -> RevealRule {
    RevealRule::new(
        "contact fields",
        TriggerStart::top(85.0),
        Visual::IDENTITY.opacity(0.0).x(-60.0).blur(5.0),
        1.0,
    )
    .stagger(0.2)
}

pub fn contact_socials() -> RevealRule {
    RevealRule::new(
        "social links",
        TriggerStart::top(90.0),
        Visual::IDENTITY.opacity(0.0).scale(0.5).rotation(-180.0),
        0.8,
    )
    .stagger(0.1)
    .ease(Ease::BackOut(BACK_OVERSHOOT))
}

pub fn footer_content() -> RevealRule {
    RevealRule::new("footer content", TriggerStart::top(90.0), RISE_SOFT, 1.0).stagger(0.2)
}

/// Drifting dots in the footer background
pub fn footer_particles<K: Copy>(particles: Vec<K>) -> RepeatingTask<K> {
    let tween = Tween::new(Visual::IDENTITY, Visual::IDENTITY.y(-30.0), 4.0).ease(Ease::Power1InOut);
    RepeatingTask::new(particles, tween, 0.5)
}

/// Every scroll reveal on the page, paired with its section id
pub fn reveal_schedule(skill_levels: &[u8]) -> Vec<(&'static str, RevealRule)> {
    vec![
        ("about", about_image()),
        ("about", about_content()),
        ("about", skill_cards()),
        ("about", skill_bars(skill_levels)),
        ("projects", projects_title()),
        ("projects", project_cards()),
        ("contact", contact_title()),
        ("contact", contact_fields()),
        ("contact", contact_socials()),
        ("footer", footer_content()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::{SectionRevealer, Viewport};

    #[test]
    fn test_hero_entrance_overlaps() {
        let tl = hero_timeline();
        let starts: Vec<f64> = (0..4).map(|i| tl.step_start(i).unwrap()).collect();
        let expected = [4.0, 4.4, 4.8, 4.8];
        for (got, want) in starts.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{} != {}", got, want);
        }
        assert!((tl.duration() - 6.3).abs() < 1e-9);
    }

    #[test]
    fn test_hero_hidden_until_gate_clears() {
        let tl = hero_timeline();
        for (part, visual) in tl.sample(3.9) {
            assert_eq!(visual.opacity, 0.0, "{:?} visible early", part);
        }
        assert!(tl.sample(10.0).iter().all(|(_, v)| *v == Visual::IDENTITY));
    }

    #[test]
    fn test_cta_hover_round_trip() {
        let grow = cta_hover(Visual::IDENTITY, true);
        let grown = grow.sample(CTA_HOVER_DURATION).visual;
        assert_eq!(grown.scale, CTA_HOVER_SCALE);
        let shrink = cta_hover(grown, false);
        assert_eq!(shrink.sample(CTA_HOVER_DURATION).visual.scale, 1.0);
    }

    #[test]
    fn test_schedule_covers_sections() {
        let schedule = reveal_schedule(&[95, 87]);
        assert_eq!(schedule.len(), 10);
        for section in ["about", "projects", "contact", "footer"] {
            assert!(schedule.iter().any(|(s, _)| *s == section));
        }
        let bars = &schedule[3].1;
        assert_eq!(bars.tween_for(1).to.width_percent, Some(87.0));
    }

    struct Tops(Vec<(&'static str, f64)>);

    impl Viewport<&'static str> for Tops {
        fn height(&self) -> f64 {
            1000.0
        }

        fn top_of(&self, handle: &'static str) -> Option<f64> {
            self.0.iter().find(|(h, _)| *h == handle).map(|(_, top)| *top)
        }
    }

    #[test]
    fn test_about_image_follows_its_section() {
        // Section top is past the 70% line while the image is still below it
        let page = Tops(vec![("section", 650.0), ("image", 780.0)]);
        let mut revealer = SectionRevealer::new();
        let id = revealer.register(about_image(), "section", ["image"], &page);

        assert_eq!(revealer.observe(&page), vec![id.unwrap()]);
    }

    #[test]
    fn test_ambient_loops_run_forever() {
        let mut orbs = hero_orbs(vec![0, 1, 2, 3]);
        assert_eq!(orbs.tick(1000.0).len(), 4);
        let mut dots = footer_particles(vec![0; 6]);
        dots.cancel();
        assert!(dots.tick(0.1).is_empty());
    }
}
