use folio_motion::AnimationController;
use folio_motion::nav::{
    Anchor, MenuPanel, NavControl, NavOutcome, NavPart, NavigationShell, entrance_timeline,
};
use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::diag::log_verbose;
use crate::dom::WindowScroll;
use crate::motion::{LoopSlot, Stage};

#[component]
pub fn Navigation(brand: String) -> impl IntoView {
    let mut entrance = AnimationController::new(entrance_timeline());
    entrance.play();
    let first = entrance.tick(0.0);
    let entrance = StoredValue::new_local(entrance);
    let bar = Stage::new(first.visuals);

    let entrance_frames = LoopSlot::new();
    entrance_frames.run(move |dt| {
        let Some(frame) = entrance.try_update_value(|c| c.tick(dt)) else {
            return false;
        };
        bar.apply(frame.visuals.iter().copied());
        !frame.settled
    });

    let shell = StoredValue::new_local(NavigationShell::new());
    let panel = Stage::new([(MenuPanel, shell.with_value(|s| s.panel_visual()))]);
    let menu_open = RwSignal::new(false);
    let panel_mounted = RwSignal::new(false);
    let menu_frames = LoopSlot::new();

    let animate_menu = move || {
        menu_frames.run(move |dt| {
            let Some((frame, visible)) = shell.try_update_value(|s| (s.tick(dt), s.panel_visible()))
            else {
                return false;
            };
            panel.apply(frame.visuals.iter().copied());
            panel_mounted.set(visible);
            !frame.settled
        });
    };

    let sync = move || {
        shell.with_value(|s| {
            menu_open.set(s.is_open());
            panel_mounted.set(s.panel_visible());
        });
        animate_menu();
    };

    let toggle = move |_: MouseEvent| {
        shell.update_value(|s| s.toggle());
        sync();
    };
    let close = move |_: MouseEvent| {
        shell.update_value(|s| s.close());
        sync();
    };
    let go = move |control: NavControl| {
        if let Some(NavOutcome::Missing(anchor)) =
            shell.try_update_value(|s| s.navigate(control, &WindowScroll))
        {
            log_verbose(&format!("Navigation to #{} ignored: no such section", anchor));
        }
        sync();
    };

    on_cleanup(move || {
        shell.try_update_value(|s| s.dispose());
    });

    view! {
        <header class="nav-bar" style=move || bar.style(NavPart::Bar)>
            <div class="nav-inner">
                <button
                    class="nav-logo text-gradient"
                    style=move || bar.style(NavPart::Logo)
                    on:click=move |_| go(NavControl::Logo)
                >
                    {brand}
                </button>

                <nav class="nav-links">
                    {Anchor::ALL
                        .into_iter()
                        .map(|anchor| {
                            view! {
                                <a
                                    class="nav-link"
                                    href=anchor.href()
                                    on:click=move |ev: MouseEvent| {
                                        ev.prevent_default();
                                        go(NavControl::Link(anchor));
                                    }
                                >
                                    {anchor.label()}
                                </a>
                            }
                        })
                        .collect_view()}
                </nav>

                <button class="btn-neon nav-cta" on:click=move |_| go(NavControl::HireMe)>
                    "Hire Me"
                </button>

                <button
                    class="nav-toggle"
                    aria-label="Toggle menu"
                    aria-expanded=move || menu_open.get().to_string()
                    on:click=toggle
                >
                    {move || if menu_open.get() { "✕" } else { "☰" }}
                </button>
            </div>

            <Show when=move || panel_mounted.get()>
                <div class="nav-panel glass-card" style=move || panel.style(MenuPanel)>
                    <button class="nav-close" aria-label="Close menu" on:click=close>
                        "✕"
                    </button>
                    <nav class="nav-panel-links">
                        {Anchor::ALL
                            .into_iter()
                            .map(|anchor| {
                                view! {
                                    <a
                                        class="nav-panel-link"
                                        href=anchor.href()
                                        on:click=move |ev: MouseEvent| {
                                            ev.prevent_default();
                                            go(NavControl::Link(anchor));
                                        }
                                    >
                                        {anchor.label()}
                                    </a>
                                }
                            })
                            .collect_view()}
                    </nav>
                    <button class="btn-neon" on:click=move |_| go(NavControl::HireMe)>
                        "Hire Me"
                    </button>
                </div>
            </Show>
        </header>
    }
}
