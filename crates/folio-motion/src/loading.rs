//! The loading gate: a fixed intro sequence that hides the page until it
//! finishes, then signals completion exactly once.

use std::fmt;

use crate::controller::AnimationController;
use crate::easing::Ease;
use crate::timeline::{Position, Timeline};
use crate::tween::{Repeat, Tween};
use crate::visual::Visual;

pub const ENTRANCE_DURATION: f64 = 0.8;
pub const ENTRANCE_STAGGER: f64 = 0.1;
pub const ENTRANCE_RISE: f64 = 30.0;
pub const FILL_DURATION: f64 = 2.5;
pub const PULSE_DURATION: f64 = 1.0;
pub const PULSE_REPEATS: u32 = 2;
pub const PULSE_SCALE: f64 = 1.05;
pub const EXIT_DURATION: f64 = 1.0;
pub const EXIT_SCALE: f64 = 0.9;

/// Extra time the watchdog waits past the sequence end before forcing
/// completion.
pub const WATCHDOG_GRACE: f64 = 1.5;

/// Elements of the loading overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatePart {
    Overlay,
    Logo,
    Bar,
    Label,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadingPhase {
    Entering,
    Filling,
    Exiting,
    Done,
}

impl fmt::Display for LoadingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadingPhase::Entering => write!(f, "entering"),
            LoadingPhase::Filling => write!(f, "filling"),
            LoadingPhase::Exiting => write!(f, "exiting"),
            LoadingPhase::Done => write!(f, "done"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingState {
    pub progress_percent: u8,
    pub phase: LoadingPhase,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self {
            progress_percent: 0,
            phase: LoadingPhase::Entering,
        }
    }
}

/// A write-once completion callback.
pub struct CompletionSignal {
    callback: Option<Box<dyn FnOnce()>>,
}

impl CompletionSignal {
    pub fn new(callback: impl FnOnce() + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// Invoke the callback if it has not run yet. Returns whether it ran now.
    pub fn fire(&mut self) -> bool {
        match self.callback.take() {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Drop the callback without running it
    pub fn revoke(&mut self) {
        self.callback = None;
    }

    pub fn is_pending(&self) -> bool {
        self.callback.is_some()
    }
}

impl fmt::Debug for CompletionSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionSignal")
            .field("pending", &self.is_pending())
            .finish()
    }
}

/// Output of one gate tick.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadingFrame {
    pub state: LoadingState,
    pub visuals: Vec<(GatePart, Visual)>,
    /// The completion callback ran during this tick
    pub completed: bool,
}

impl LoadingFrame {
    /// Text for the percentage label
    pub fn label(&self) -> String {
        format!("{}%", self.state.progress_percent)
    }

    pub fn visual(&self, part: GatePart) -> Option<Visual> {
        self.visuals
            .iter()
            .find(|(p, _)| *p == part)
            .map(|(_, v)| *v)
    }
}

#[derive(Debug)]
pub struct LoadingGate {
    controller: AnimationController<GatePart>,
    fill_step: usize,
    fill_start: f64,
    exit_start: f64,
    state: LoadingState,
    completion: CompletionSignal,
    disposed: bool,
}

/// The intro sequence: entrance, fill with a concurrent logo pulse, exit.
pub fn gate_timeline() -> (Timeline<GatePart>, usize, usize) {
    let hidden = Visual::IDENTITY.opacity(0.0).y(ENTRANCE_RISE);
    let entrance = Tween::new(hidden, Visual::IDENTITY, ENTRANCE_DURATION).ease(Ease::Power2Out);
    let fill = Tween::new(
        Visual::IDENTITY.width(0.0),
        Visual::IDENTITY.width(100.0),
        FILL_DURATION,
    )
    .ease(Ease::Power2Out);
    let pulse = Tween::new(
        Visual::IDENTITY,
        Visual::IDENTITY.scale(PULSE_SCALE),
        PULSE_DURATION,
    )
    .ease(Ease::Power1InOut)
    .repeat(Repeat::Count(PULSE_REPEATS))
    .yoyo(true);
    let exit = Tween::new(
        Visual::IDENTITY,
        Visual::IDENTITY.opacity(0.0).scale(EXIT_SCALE),
        EXIT_DURATION,
    )
    .ease(Ease::Power2InOut);

    let mut timeline = Timeline::new();
    timeline.add(
        GatePart::Overlay,
        Tween::new(Visual::IDENTITY, Visual::IDENTITY, 0.0),
        Position::At(0.0),
    );
    // Logo, bar and label rise together with a small stagger
    timeline.add(GatePart::Logo, entrance.clone(), Position::At(0.0));
    timeline.add(
        GatePart::Bar,
        Tween {
            from: hidden.width(0.0),
            to: Visual::IDENTITY.width(0.0),
            ..entrance.clone()
        },
        Position::At(ENTRANCE_STAGGER),
    );
    timeline.add(GatePart::Label, entrance, Position::At(ENTRANCE_STAGGER * 2.0));
    let fill_step = timeline.add(GatePart::Bar, fill, Position::Sequential);
    timeline.add(GatePart::Logo, pulse, Position::WithPrevious);
    let exit_step = timeline.add(GatePart::Overlay, exit, Position::Sequential);
    (timeline, fill_step, exit_step)
}

impl LoadingGate {
    /// Start the sequence. `on_complete` runs once the exit has finished.
    pub fn new(on_complete: impl FnOnce() + 'static) -> Self {
        let (timeline, fill_step, exit_step) = gate_timeline();
        let fill_start = timeline.step_start(fill_step).unwrap_or(0.0);
        let exit_start = timeline.step_start(exit_step).unwrap_or(0.0);
        let mut controller = AnimationController::new(timeline);
        controller.play();
        Self {
            controller,
            fill_step,
            fill_start,
            exit_start,
            state: LoadingState::default(),
            completion: CompletionSignal::new(on_complete),
            disposed: false,
        }
    }

    pub fn state(&self) -> LoadingState {
        self.state
    }

    /// Length of the whole sequence in seconds
    pub fn duration(&self) -> f64 {
        self.controller.timeline().duration()
    }

    /// When the watchdog should force completion, measured from mount
    pub fn watchdog_delay(&self) -> f64 {
        self.duration() + WATCHDOG_GRACE
    }

    pub fn is_done(&self) -> bool {
        self.state.phase == LoadingPhase::Done
    }

    fn phase_at(&self, t: f64) -> LoadingPhase {
        if t >= self.duration() {
            LoadingPhase::Done
        } else if t >= self.exit_start {
            LoadingPhase::Exiting
        } else if t >= self.fill_start {
            LoadingPhase::Filling
        } else {
            LoadingPhase::Entering
        }
    }

    fn finish(&mut self) -> bool {
        self.state = LoadingState {
            progress_percent: 100,
            phase: LoadingPhase::Done,
        };
        self.controller.cancel();
        self.completion.fire()
    }

    /// Advance the sequence by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> LoadingFrame {
        if self.disposed || self.is_done() {
            return LoadingFrame {
                state: self.state,
                visuals: Vec::new(),
                completed: false,
            };
        }

        let frame = self.controller.tick(dt);
        let t = self.controller.playhead();

        let fill_percent = self
            .controller
            .timeline()
            .step_sample(self.fill_step, t)
            .map(|s| (s.progress * 100.0).round().clamp(0.0, 100.0) as u8)
            .unwrap_or(0);

        // Never step backwards even if a sample rounds down
        self.state.progress_percent = self.state.progress_percent.max(fill_percent);
        self.state.phase = self.phase_at(t);

        let completed = if self.state.phase == LoadingPhase::Done {
            self.finish()
        } else {
            false
        };

        LoadingFrame {
            state: self.state,
            visuals: frame.visuals,
            completed,
        }
    }

    /// Force the gate to its end state if the frame clock never got there.
    /// Returns whether the completion callback ran now.
    pub fn force_complete(&mut self) -> bool {
        if self.disposed || self.is_done() {
            return false;
        }
        self.finish()
    }

    /// Tear down without completing. Later ticks and watchdogs do nothing.
    pub fn dispose(&mut self) {
        if !self.is_done() {
            self.completion.revoke();
        }
        self.controller.cancel();
        self.disposed = true;
    }
}
