use std::time::Duration;

use folio_motion::LoadingGate;
use folio_motion::loading::{GatePart, LoadingPhase};
use leptos::prelude::*;

use crate::diag::{log_verbose, log_warning};
use crate::motion::{LoopSlot, Stage};

/// Full-screen intro. Calls `on_complete` exactly once, when the exit fade
/// has finished or the watchdog gives up waiting for frames.
#[component]
pub fn LoadingScreen(brand: String, on_complete: Callback<()>) -> impl IntoView {
    let mut gate = LoadingGate::new(move || on_complete.run(()));
    let first = gate.tick(0.0);
    let watchdog_delay = gate.watchdog_delay();

    let gate = StoredValue::new_local(gate);
    let label = RwSignal::new(first.label());
    let stage = Stage::new(first.visuals);
    let phase = StoredValue::new(first.state.phase);

    let frames = LoopSlot::new();
    frames.run(move |dt| {
        let Some(frame) = gate.try_update_value(|g| g.tick(dt)) else {
            return false;
        };
        stage.apply(frame.visuals.iter().copied());
        label.set(frame.label());

        if phase.get_value() != frame.state.phase {
            log_verbose(&format!("Loading gate: {}", frame.state.phase));
            phase.set_value(frame.state.phase);
        }
        if frame.completed {
            log_verbose("Loading gate: completion signalled");
        }
        frame.state.phase != LoadingPhase::Done
    });

    // The frame clock can stall in a background tab; never leave the page hidden
    match set_timeout_with_handle(
        move || {
            if gate.try_update_value(|g| g.force_complete()).unwrap_or(false) {
                log_warning("Loading sequence stalled; forced completion");
            }
        },
        Duration::from_secs_f64(watchdog_delay),
    ) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(_) => log_warning("Could not arm the loading watchdog"),
    }

    on_cleanup(move || {
        frames.stop();
        gate.try_update_value(|g| g.dispose());
    });

    view! {
        <div class="loading-screen" style=move || stage.style(GatePart::Overlay)>
            <div class="loading-orbs">
                <div class="orb orb-primary"></div>
                <div class="orb orb-accent"></div>
                <div class="orb orb-cyan"></div>
            </div>
            <div class="loading-content">
                <div class="loading-logo text-gradient" style=move || stage.style(GatePart::Logo)>
                    {brand}
                </div>
                <div class="loading-progress">
                    <div class="loading-track glass-card">
                        <div class="loading-bar" style=move || stage.style(GatePart::Bar)></div>
                    </div>
                    <div class="loading-label" style=move || stage.style(GatePart::Label)>
                        {move || label.get()}
                    </div>
                </div>
                <div class="loading-caption">"Loading Experience"</div>
            </div>
        </div>
    }
}
