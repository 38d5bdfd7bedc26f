//! Navigation shell: anchor routing, the mobile menu and the bar entrance.

use std::fmt;

use crate::controller::{AnimationController, Frame};
use crate::easing::Ease;
use crate::timeline::{Position, Timeline};
use crate::tween::Tween;
use crate::visual::Visual;

pub const BAR_DELAY: f64 = 3.5;
pub const BAR_DURATION: f64 = 1.0;
pub const BAR_DROP: f64 = -100.0;
pub const LOGO_DELAY: f64 = 3.7;
pub const LOGO_DURATION: f64 = 0.8;
pub const MENU_OPEN_DURATION: f64 = 0.5;
pub const MENU_CLOSE_DURATION: f64 = 0.3;

/// In-page scroll destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Home,
    About,
    Projects,
    Contact,
}

impl Anchor {
    pub const ALL: [Anchor; 4] = [Anchor::Home, Anchor::About, Anchor::Projects, Anchor::Contact];

    /// Element id of the section
    pub fn id(self) -> &'static str {
        match self {
            Anchor::Home => "home",
            Anchor::About => "about",
            Anchor::Projects => "projects",
            Anchor::Contact => "contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Anchor::Home => "Home",
            Anchor::About => "About",
            Anchor::Projects => "Projects",
            Anchor::Contact => "Contact",
        }
    }

    pub fn href(self) -> String {
        format!("#{}", self.id())
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Clickable controls in the nav bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavControl {
    Logo,
    Link(Anchor),
    HireMe,
}

impl NavControl {
    pub const ALL: [NavControl; 6] = [
        NavControl::Logo,
        NavControl::Link(Anchor::Home),
        NavControl::Link(Anchor::About),
        NavControl::Link(Anchor::Projects),
        NavControl::Link(Anchor::Contact),
        NavControl::HireMe,
    ];

    pub fn target(self) -> Anchor {
        match self {
            NavControl::Logo => Anchor::Home,
            NavControl::Link(anchor) => anchor,
            NavControl::HireMe => Anchor::Contact,
        }
    }
}

/// Something that can bring a section into view.
pub trait ScrollHost {
    /// Smooth-scroll to the element with this id. Returns false when there
    /// is no such element.
    fn scroll_to_anchor(&self, id: &str) -> bool;

    /// Smooth-scroll to the top of the document
    fn scroll_to_top(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Scrolled(Anchor),
    /// The anchor element is not in the document; nothing happened
    Missing(Anchor),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Open,
    Closed,
}

/// The mobile menu panel is the only animated target of the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuPanel;

const PANEL_CLOSED: Visual = Visual::IDENTITY.x_percent(100.0).opacity(0.0);
const PANEL_OPEN: Visual = Visual::IDENTITY;

#[derive(Debug)]
pub struct NavigationShell {
    menu: MenuState,
    panel: AnimationController<MenuPanel>,
    current: Visual,
}

impl Default for NavigationShell {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationShell {
    pub fn new() -> Self {
        let rest = Tween::new(PANEL_CLOSED, PANEL_CLOSED, 0.0);
        Self {
            menu: MenuState::Closed,
            panel: AnimationController::new(Timeline::single(MenuPanel, rest)),
            current: PANEL_CLOSED,
        }
    }

    pub fn menu(&self) -> MenuState {
        self.menu
    }

    pub fn is_open(&self) -> bool {
        self.menu == MenuState::Open
    }

    /// The panel stays mounted until a close has finished animating
    pub fn panel_visible(&self) -> bool {
        self.is_open() || self.panel.is_running()
    }

    pub fn panel_visual(&self) -> Visual {
        self.current
    }

    fn animate_to(&mut self, to: Visual, duration: f64, ease: Ease) {
        // Start from wherever the panel is so a quick toggle never jumps
        let tween = Tween::new(self.current, to, duration).ease(ease);
        self.panel.cancel();
        self.panel = AnimationController::playing(MenuPanel, tween);
    }

    pub fn open(&mut self) {
        if self.menu == MenuState::Open {
            return;
        }
        self.menu = MenuState::Open;
        self.animate_to(PANEL_OPEN, MENU_OPEN_DURATION, Ease::Power2Out);
    }

    pub fn close(&mut self) {
        if self.menu == MenuState::Closed {
            return;
        }
        self.menu = MenuState::Closed;
        self.animate_to(PANEL_CLOSED, MENU_CLOSE_DURATION, Ease::Power2In);
    }

    pub fn toggle(&mut self) {
        match self.menu {
            MenuState::Open => self.close(),
            MenuState::Closed => self.open(),
        }
    }

    /// Scroll to the control's anchor and close the menu.
    pub fn navigate(&mut self, control: NavControl, host: &impl ScrollHost) -> NavOutcome {
        self.close();
        let anchor = control.target();
        if host.scroll_to_anchor(anchor.id()) {
            NavOutcome::Scrolled(anchor)
        } else {
            NavOutcome::Missing(anchor)
        }
    }

    pub fn tick(&mut self, dt: f64) -> Frame<MenuPanel> {
        let frame = self.panel.tick(dt);
        if let Some(visual) = frame.get(MenuPanel) {
            self.current = visual;
        }
        frame
    }

    pub fn dispose(&mut self) {
        self.panel.cancel();
    }
}

/// Parts of the nav bar that animate in after the loading gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavPart {
    Bar,
    Logo,
}

/// Bar drop-in followed by the logo pop, measured from mount
pub fn entrance_timeline() -> Timeline<NavPart> {
    let mut timeline = Timeline::new();
    timeline.add(
        NavPart::Bar,
        Tween::new(Visual::IDENTITY.opacity(0.0).y(BAR_DROP), Visual::IDENTITY, BAR_DURATION)
            .ease(Ease::Power2Out),
        Position::At(BAR_DELAY),
    );
    timeline.add(
        NavPart::Logo,
        Tween::new(Visual::IDENTITY.scale(0.0), Visual::IDENTITY, LOGO_DURATION)
            .ease(Ease::BackOut(crate::easing::BACK_OVERSHOOT)),
        Position::At(LOGO_DELAY),
    );
    timeline
}
