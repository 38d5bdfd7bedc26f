//! Animation sequencing and page state for the folio portfolio site.
//!
//! Everything here is pure: time is passed in as seconds and element
//! geometry through small traits, so the same code runs in the browser, the
//! `folio` CLI and unit tests.

pub mod contact;
pub mod controller;
pub mod easing;
pub mod loading;
pub mod nav;
pub mod pin;
pub mod repeating;
pub mod reveal;
pub mod sections;
pub mod site;
pub mod timeline;
pub mod tween;
pub mod visual;

pub use contact::{ContactForm, ContactPayload, Field, FormPhase, SubmitOutcome, SubmitTransport};
pub use controller::{AnimationController, Frame, Playback};
pub use easing::Ease;
pub use loading::{LoadingGate, LoadingPhase, LoadingState};
pub use nav::{Anchor, NavControl, NavigationShell, ScrollHost};
pub use pin::HorizontalPin;
pub use repeating::RepeatingTask;
pub use reveal::{RevealRule, SectionRevealer, TriggerStart, Viewport};
pub use site::SiteConfig;
pub use timeline::{Position, Timeline};
pub use tween::{Repeat, Tween};
pub use visual::Visual;
