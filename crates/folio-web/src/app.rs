use folio_motion::sections::page_fade;
use folio_motion::{AnimationController, SiteConfig, Visual};
use leptos::prelude::*;
use leptos_meta::*;

use crate::components::{About, Contact, Footer, Hero, LoadingScreen, Navigation, Projects};
use crate::diag::{log_verbose, log_warning, set_verbose};
use crate::dom;
use crate::motion::LoopSlot;

const DESCRIPTION: &str = "Portfolio of a web developer: selected projects, skills and a way to get in touch.";

#[component]
pub fn App() -> impl IntoView {
    let site = SiteConfig::embedded().unwrap_or_else(|e| {
        log_warning(&format!("Embedded site.toml is invalid, using defaults: {:#}", e));
        SiteConfig::default()
    });
    set_verbose(site.debug);
    let title = site.page_title();
    let brand = site.owner.brand.clone();
    let gate_brand = brand.clone();
    provide_context(site);
    provide_meta_context();

    dom::set_scroll_behavior("smooth");
    on_cleanup(|| dom::set_scroll_behavior("auto"));

    // The page mounts hidden beneath the loading screen so the nav and hero
    // entrances run on the same clock
    let loaded = RwSignal::new(false);
    let page = RwSignal::new(Visual::IDENTITY.opacity(0.0));
    let fade_frames = LoopSlot::new();

    let on_loaded = Callback::new(move |_| {
        if loaded.get_untracked() {
            return;
        }
        log_verbose("Loading finished; revealing page");
        loaded.set(true);
        let mut fade = AnimationController::playing((), page_fade());
        fade_frames.run(move |dt| {
            let frame = fade.tick(dt);
            if let Some(visual) = frame.get(()) {
                page.set(visual);
            }
            !frame.settled
        });
    });

    view! {
        <Title text=title/>
        <Meta name="description" content=DESCRIPTION/>

        <Show when=move || !loaded.get()>
            <LoadingScreen brand=gate_brand.clone() on_complete=on_loaded/>
        </Show>

        <div class="page" style=move || page.get().to_css()>
            <Navigation brand=brand/>
            <main>
                <Hero/>
                <About/>
                <Projects/>
                <Contact/>
            </main>
            <Footer/>
        </div>
    }
}
