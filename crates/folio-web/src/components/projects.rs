use folio_motion::nav::Anchor;
use folio_motion::sections::{project_cards, projects_title};
use folio_motion::{HorizontalPin, SiteConfig};
use leptos::html::Div;
use leptos::prelude::*;

use crate::diag::log_verbose;
use crate::dom;
use crate::motion::{Handles, LoopSlot, RevealGroup, Stage, use_reveals};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ProjectEl {
    Title,
    Row,
    Card(usize),
}

#[component]
pub fn Projects() -> impl IntoView {
    let site = expect_context::<SiteConfig>();
    let projects = site.projects.clone();
    let count = projects.len();

    let mut keys = vec![ProjectEl::Title, ProjectEl::Row];
    keys.extend((0..count).map(ProjectEl::Card));
    let handles = Handles::new(keys);
    let stage = Stage::new([]);
    let groups = vec![
        RevealGroup::new(projects_title(), ProjectEl::Title, [ProjectEl::Title]),
        RevealGroup::new(project_cards(), ProjectEl::Row, (0..count).map(ProjectEl::Card)),
    ];
    use_reveals(Anchor::Projects.id(), stage, handles, groups);

    let wrapper = NodeRef::<Div>::new();
    let pin = StoredValue::new_local(HorizontalPin::new(count));
    // Wide enough to pin at all, and currently inside the pinned range
    let pin_active = RwSignal::new(false);
    let pinned = RwSignal::new(false);
    let distance = RwSignal::new(0.0);
    let card_x = RwSignal::new(0.0);
    let frames = LoopSlot::new();

    let scrub = move || {
        if frames.is_running() {
            return;
        }
        frames.run(move |dt| {
            let Some((frame, scrubbing)) = pin.try_update_value(|p| (p.tick(dt), p.is_scrubbing()))
            else {
                return false;
            };
            card_x.set(frame.card_x_percent);
            if let Some(top) = frame.snap_to {
                dom::scroll_to(top);
            }
            scrubbing
        });
    };

    let follow_scroll = move || {
        let scroll_y = dom::scroll_y();
        let Some((enabled, in_range)) = pin.try_update_value(|p| {
            p.on_scroll(scroll_y);
            (p.is_enabled(), p.is_pinned(scroll_y))
        }) else {
            return;
        };
        if pinned.get_untracked() != in_range {
            pinned.set(in_range);
        }
        if enabled {
            scrub();
        }
    };

    let measure = move || {
        let Some(wrapper) = wrapper.get_untracked() else {
            return;
        };
        let width = dom::viewport_width();
        let pin_start = dom::document_top(&wrapper);
        let Some((changed, enabled, pin_distance)) = pin.try_update_value(|p| {
            let changed = p.resize(width, pin_start);
            (changed, p.is_enabled(), p.pin_distance())
        }) else {
            return;
        };
        if changed {
            log_verbose(&format!(
                "Project pin {} at {}px wide",
                if enabled { "enabled" } else { "disabled" },
                width
            ));
            card_x.set(0.0);
        }
        pin_active.set(enabled);
        distance.set(pin_distance);
        if enabled {
            follow_scroll();
        } else {
            pinned.set(false);
        }
    };

    // Reading the ref subscribes, so this runs again once the wrapper mounts
    Effect::new(move |_| {
        if wrapper.get().is_some() {
            measure();
        }
    });

    let on_scroll = window_event_listener(leptos::ev::scroll, move |_| follow_scroll());
    let on_resize = window_event_listener(leptos::ev::resize, move |_| measure());

    on_cleanup(move || {
        on_scroll.remove();
        on_resize.remove();
    });

    let wrapper_style = move || {
        if pin_active.get() {
            format!("height:calc(100vh + {}px);", distance.get())
        } else {
            String::new()
        }
    };

    view! {
        <section id=Anchor::Projects.id() class="projects">
            <div class="section-inner">
                <div node_ref=handles.node(ProjectEl::Title) style=move || stage.style(ProjectEl::Title)>
                    <h2 class="section-title">"Featured " <span class="text-gradient">"Projects"</span></h2>
                </div>
            </div>

            <div node_ref=wrapper class="projects-pin" class:is-pinned=move || pinned.get() style=wrapper_style>
                <div class="projects-sticky">
                    <div node_ref=handles.node(ProjectEl::Row) class="projects-row">
                        {projects
                            .into_iter()
                            .enumerate()
                            .map(|(i, project)| {
                                let card = ProjectEl::Card(i);
                                view! {
                                    <div
                                        node_ref=handles.node(card)
                                        class="project-card glass-card"
                                        style=move || stage.visual(card).x_percent(card_x.get()).to_css()
                                    >
                                        <div class="project-image">
                                            <img src=project.image alt=project.title.clone() loading="lazy"/>
                                        </div>
                                        <div class="project-body">
                                            <h3>{project.title}</h3>
                                            <p>{project.description}</p>
                                            <div class="project-tech">
                                                {project
                                                    .tech
                                                    .into_iter()
                                                    .map(|tech| view! { <span class="tech-tag">{tech}</span> })
                                                    .collect_view()}
                                            </div>
                                            <div class="project-links">
                                                <a href=project.github target="_blank" rel="noopener noreferrer">"Code"</a>
                                                <a href=project.live target="_blank" rel="noopener noreferrer">"Live Demo"</a>
                                            </div>
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </div>
        </section>
    }
}
