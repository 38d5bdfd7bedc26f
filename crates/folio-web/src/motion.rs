//! Browser glue for `folio-motion`: the frame clock, reactive styles and
//! scroll-triggered reveals.
//!
//! Every helper here ties its resources to the current reactive owner, so a
//! component that unmounts releases its animation frames, listeners and
//! observers without further bookkeeping.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::{Rc, Weak};

use folio_motion::reveal::ObserverId;
use folio_motion::{RepeatingTask, RevealRule, SectionRevealer, Viewport, Visual};
use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Element;

use crate::diag::{log_verbose, log_warning};
use crate::dom;

struct LoopState {
    request: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl LoopState {
    fn schedule(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(callback) = self.callback.borrow().as_ref() {
            match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                Ok(id) => self.request.set(Some(id)),
                Err(_) => log_warning("requestAnimationFrame was refused"),
            }
        }
    }

    fn cancel(&self) {
        if let Some(id) = self.request.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for LoopState {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A `requestAnimationFrame` loop.
///
/// The callback receives seconds since the previous frame and returns
/// whether it wants another one. Dropping the loop cancels any pending frame.
pub struct FrameLoop {
    state: Rc<LoopState>,
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut(f64) -> bool + 'static) -> Self {
        let state = Rc::new(LoopState {
            request: Cell::new(None),
            callback: RefCell::new(None),
        });
        let weak: Weak<LoopState> = Rc::downgrade(&state);
        let mut last: Option<f64> = None;

        let callback = Closure::<dyn FnMut(f64)>::new(move |now: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.request.set(None);
            // The first frame only establishes the time base
            let dt = last.map_or(0.0, |prev| ((now - prev) / 1000.0).max(0.0));
            last = Some(now);
            if on_frame(dt) {
                state.schedule();
            }
        });

        *state.callback.borrow_mut() = Some(callback);
        state.schedule();
        Self { state }
    }

    pub fn stop(&self) {
        self.state.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.state.request.get().is_some()
    }
}

/// Holds at most one [`FrameLoop`] for a component; starting a new one
/// replaces the old. Stopped when the owning component is cleaned up.
#[derive(Clone, Copy)]
pub struct LoopSlot {
    slot: StoredValue<Option<FrameLoop>, LocalStorage>,
}

impl LoopSlot {
    pub fn new() -> Self {
        let slot = StoredValue::new_local(None::<FrameLoop>);
        on_cleanup(move || {
            slot.try_update_value(|current| {
                if let Some(frame_loop) = current.take() {
                    frame_loop.stop();
                }
            });
        });
        Self { slot }
    }

    pub fn run(&self, on_frame: impl FnMut(f64) -> bool + 'static) {
        let frame_loop = FrameLoop::start(on_frame);
        self.slot.try_update_value(|current| {
            if let Some(old) = current.replace(frame_loop) {
                old.stop();
            }
        });
    }

    pub fn stop(&self) {
        self.slot.try_update_value(|current| {
            if let Some(frame_loop) = current.take() {
                frame_loop.stop();
            }
        });
    }

    pub fn is_running(&self) -> bool {
        self.slot
            .try_with_value(|current| current.as_ref().is_some_and(FrameLoop::is_running))
            .unwrap_or(false)
    }
}

/// Current visual of every animated element in a component, as a signal.
#[derive(Clone, Copy)]
pub struct Stage<K: Send + Sync + 'static> {
    visuals: RwSignal<HashMap<K, Visual>>,
}

impl<K: Copy + Eq + Hash + Send + Sync + 'static> Stage<K> {
    pub fn new(initial: impl IntoIterator<Item = (K, Visual)>) -> Self {
        Self {
            visuals: RwSignal::new(initial.into_iter().collect()),
        }
    }

    pub fn apply(&self, visuals: impl IntoIterator<Item = (K, Visual)>) {
        let visuals: Vec<(K, Visual)> = visuals.into_iter().collect();
        if visuals.is_empty() {
            return;
        }
        self.visuals.update(|map| map.extend(visuals));
    }

    pub fn visual(&self, target: K) -> Visual {
        self.visuals
            .with(|map| map.get(&target).copied())
            .unwrap_or(Visual::IDENTITY)
    }

    /// Inline style for `target`; reactive when read inside a view
    pub fn style(&self, target: K) -> String {
        self.visual(target).to_css()
    }
}

/// Drive an endless loop into `stage`; the task is cancelled with the owner.
pub fn run_ambient<K>(task: RepeatingTask<K>, stage: Stage<K>)
where
    K: Copy + Eq + Hash + Send + Sync + 'static,
{
    let task = StoredValue::new_local(task);
    let frames = LoopSlot::new();
    frames.run(move |dt| match task.try_update_value(|t| t.tick(dt)) {
        Some(visuals) if !visuals.is_empty() => {
            stage.apply(visuals);
            true
        }
        _ => false,
    });
    on_cleanup(move || {
        task.try_update_value(|t| t.cancel());
    });
}

/// Typed element handles for one section, bound with `node_ref`.
#[derive(Clone, Copy)]
pub struct Handles<K: 'static> {
    refs: StoredValue<HashMap<K, NodeRef<Div>>, LocalStorage>,
}

impl<K: Copy + Eq + Hash + 'static> Handles<K> {
    pub fn new(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            refs: StoredValue::new_local(keys.into_iter().map(|k| (k, NodeRef::new())).collect()),
        }
    }

    /// The ref to bind on the element for `key`
    pub fn node(&self, key: K) -> NodeRef<Div> {
        self.refs
            .try_update_value(|refs| *refs.entry(key).or_insert_with(NodeRef::new))
            .unwrap_or_else(NodeRef::new)
    }

    /// Every key with its element, `None` while unmounted
    pub fn resolve(&self) -> Vec<(K, Option<Element>)> {
        self.refs
            .try_with_value(|refs| {
                refs.iter()
                    .map(|(k, node)| (*k, node.get_untracked().map(Element::from)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Element geometry read from the live document
pub struct DomViewport<K> {
    elements: HashMap<K, Element>,
    height: f64,
}

impl<K: Eq + Hash> DomViewport<K> {
    pub fn capture(handles: impl IntoIterator<Item = (K, Option<Element>)>) -> Self {
        Self {
            elements: handles
                .into_iter()
                .filter_map(|(k, el)| el.map(|el| (k, el)))
                .collect(),
            height: dom::viewport_height(),
        }
    }
}

impl<K: Copy + Eq + Hash> Viewport<K> for DomViewport<K> {
    fn height(&self) -> f64 {
        self.height
    }

    fn top_of(&self, handle: K) -> Option<f64> {
        self.elements
            .get(&handle)
            .map(|el| el.get_bounding_client_rect().top())
    }
}

/// One reveal rule bound to the elements it animates
pub struct RevealGroup<K> {
    pub rule: RevealRule,
    pub trigger: K,
    pub elements: Vec<K>,
}

impl<K: Copy> RevealGroup<K> {
    pub fn new(rule: RevealRule, trigger: K, elements: impl IntoIterator<Item = K>) -> Self {
        Self {
            rule,
            trigger,
            elements: elements.into_iter().collect(),
        }
    }
}

/// Wire a section's scroll reveals into `stage`.
///
/// Rules register once the section is mounted and only their elements are
/// hidden; a group whose trigger is missing stays as rendered. Window scroll
/// and resize drive the observers.
pub fn use_reveals<K>(
    section: &'static str,
    stage: Stage<K>,
    handles: Handles<K>,
    groups: Vec<RevealGroup<K>>,
) where
    K: Copy + Eq + Hash + Send + Sync + 'static,
{
    let revealer = StoredValue::new_local(SectionRevealer::<K>::new());
    let pending = StoredValue::new_local(groups);
    let frames = LoopSlot::new();

    let animate = move || {
        frames.run(move |dt| {
            let Some((visuals, animating)) = revealer.try_update_value(|r| {
                let visuals = r.tick(dt);
                (visuals, r.is_animating())
            }) else {
                return false;
            };
            stage.apply(visuals);
            animating
        });
    };

    let check = move || {
        if revealer.try_with_value(|r| r.is_complete()).unwrap_or(true) {
            return;
        }
        let viewport = DomViewport::capture(handles.resolve());
        let fired: Vec<ObserverId> = revealer
            .try_update_value(|r| r.observe(&viewport))
            .unwrap_or_default();
        if fired.is_empty() {
            return;
        }
        revealer.with_value(|r| {
            for id in &fired {
                if let Some(label) = r.label_of(*id) {
                    log_verbose(&format!("{}: revealing {}", section, label));
                }
            }
        });
        animate();
    };

    Effect::new(move |_| {
        let groups = pending
            .try_update_value(std::mem::take)
            .unwrap_or_default();
        if groups.is_empty() {
            return;
        }
        let viewport = DomViewport::capture(handles.resolve());
        let hidden = revealer.try_update_value(|r| {
            for group in groups {
                let label = group.rule.label;
                if r.register(group.rule, group.trigger, group.elements, &viewport)
                    .is_none()
                {
                    log_verbose(&format!("{}: trigger for {} not found, skipped", section, label));
                }
            }
            log_verbose(&format!("{}: {} observers registered", section, r.observer_count()));
            // Nothing has fired yet, so this is every registered element at rest
            r.tick(0.0)
        });
        stage.apply(hidden.unwrap_or_default());
        // Sections already in view fire without waiting for a scroll
        check();
    });

    let on_scroll = window_event_listener(leptos::ev::scroll, move |_| check());
    let on_resize = window_event_listener(leptos::ev::resize, move |_| check());

    on_cleanup(move || {
        on_scroll.remove();
        on_resize.remove();
        revealer.try_update_value(|r| r.dispose());
        log_verbose(&format!("{}: observers disposed", section));
    });
}
