use folio_motion::nav::Anchor;
use folio_motion::sections::{HeroPart, cta_hover, hero_orbs, hero_timeline};
use folio_motion::{AnimationController, ScrollHost, SiteConfig, Visual};
use leptos::prelude::*;

use crate::dom::WindowScroll;
use crate::motion::{LoopSlot, Stage, run_ambient};

const ORB_COUNT: usize = 4;

#[component]
pub fn Hero() -> impl IntoView {
    let site = expect_context::<SiteConfig>();

    let mut entrance = AnimationController::new(hero_timeline());
    entrance.play();
    let first = entrance.tick(0.0);
    let entrance = StoredValue::new_local(entrance);
    let stage = Stage::new(first.visuals);

    let frames = LoopSlot::new();
    frames.run(move |dt| {
        let Some(frame) = entrance.try_update_value(|c| c.tick(dt)) else {
            return false;
        };
        stage.apply(frame.visuals.iter().copied());
        !frame.settled
    });

    let orbs = Stage::new((0..ORB_COUNT).map(|i| (i, Visual::IDENTITY)));
    run_ambient(hero_orbs((0..ORB_COUNT).collect()), orbs);

    let hover = RwSignal::new(Visual::IDENTITY);
    let hover_frames = LoopSlot::new();
    let hover_to = move |hovered: bool| {
        let mut controller = AnimationController::playing((), cta_hover(hover.get_untracked(), hovered));
        hover_frames.run(move |dt| {
            let frame = controller.tick(dt);
            if let Some(visual) = frame.get(()) {
                hover.set(visual);
            }
            !frame.settled
        });
    };

    view! {
        <section id=Anchor::Home.id() class="hero">
            <div class="hero-glow"></div>
            <div class="hero-orbs">
                {(0..ORB_COUNT)
                    .map(|i| {
                        view! { <div class=format!("orb orb-{}", i) style=move || orbs.style(i)></div> }
                    })
                    .collect_view()}
            </div>

            <div class="hero-grid">
                <div class="hero-copy">
                    <div class="hero-title" style=move || stage.style(HeroPart::Title)>
                        <div class="hero-role">"✦ " {site.owner.role.clone()}</div>
                        <h1>"Hi, I'm " <span class="text-gradient">{site.owner.name.clone()}</span></h1>
                        <h2>{site.owner.tagline.clone()}</h2>
                    </div>

                    <div class="hero-subtitle" style=move || stage.style(HeroPart::Subtitle)>
                        <p>{site.hero.subtitle.clone()}</p>
                    </div>

                    <div class="hero-cta" style=move || stage.style(HeroPart::Cta)>
                        <button
                            class="btn-neon"
                            style=move || hover.get().to_css()
                            on:mouseenter=move |_| hover_to(true)
                            on:mouseleave=move |_| hover_to(false)
                            on:click=move |_| {
                                WindowScroll.scroll_to_anchor(Anchor::Contact.id());
                            }
                        >
                            {site.hero.cta.clone()}
                            " →"
                        </button>
                    </div>
                </div>

                <div class="hero-card" style=move || stage.style(HeroPart::Card)>
                    <div class="glass-card hero-card-inner">
                        <div class="hero-card-sphere"></div>
                        <p>"3D Model Loading..."</p>
                    </div>
                </div>
            </div>

            <div class="scroll-indicator">
                <div class="scroll-dot"></div>
            </div>
        </section>
    }
}
