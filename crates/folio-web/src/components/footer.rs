use chrono::Datelike;
use folio_motion::nav::Anchor;
use folio_motion::sections::{footer_content, footer_particles};
use folio_motion::{ScrollHost, SiteConfig, Visual};
use leptos::prelude::*;

use crate::dom::WindowScroll;
use crate::motion::{Handles, RevealGroup, Stage, run_ambient, use_reveals};

const PARTICLES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum FooterEl {
    Content,
    Block(usize),
}

/// Brand, quick links, contact
const BLOCKS: usize = 3;

#[component]
pub fn Footer() -> impl IntoView {
    let site = expect_context::<SiteConfig>();
    let year = chrono::Local::now().year();

    let mut keys = vec![FooterEl::Content];
    keys.extend((0..BLOCKS).map(FooterEl::Block));
    let handles = Handles::new(keys);
    let stage = Stage::new([]);
    let groups = vec![RevealGroup::new(
        footer_content(),
        FooterEl::Content,
        (0..BLOCKS).map(FooterEl::Block),
    )];
    use_reveals("footer", stage, handles, groups);

    let particles = Stage::new((0..PARTICLES).map(|i| (i, Visual::IDENTITY)));
    run_ambient(footer_particles((0..PARTICLES).collect()), particles);

    let block = move |i: usize| FooterEl::Block(i);

    view! {
        <footer class="footer">
            <div class="footer-particles">
                {(0..PARTICLES)
                    .map(|i| {
                        view! { <span class=format!("particle particle-{}", i) style=move || particles.style(i)></span> }
                    })
                    .collect_view()}
            </div>

            <div node_ref=handles.node(FooterEl::Content) class="footer-content section-inner">
                <div node_ref=handles.node(block(0)) class="footer-brand" style=move || stage.style(block(0))>
                    <div class="text-gradient footer-logo">{site.owner.brand.clone()}</div>
                    <p>{site.owner.tagline.clone()}</p>
                </div>

                <div node_ref=handles.node(block(1)) class="footer-links" style=move || stage.style(block(1))>
                    <h4>"Quick Links"</h4>
                    {Anchor::ALL
                        .into_iter()
                        .map(|anchor| {
                            view! {
                                <button
                                    class="footer-link"
                                    on:click=move |_| {
                                        WindowScroll.scroll_to_anchor(anchor.id());
                                    }
                                >
                                    {anchor.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                <div node_ref=handles.node(block(2)) class="footer-contact" style=move || stage.style(block(2))>
                    <h4>"Contact"</h4>
                    <a href=format!("mailto:{}", site.contact.email)>{site.contact.email.clone()}</a>
                    <button class="btn-neon back-to-top" on:click=move |_| WindowScroll.scroll_to_top()>
                        "Back to top ↑"
                    </button>
                </div>
            </div>

            <div class="footer-bottom">
                <p>{format!("© {} {}. All rights reserved.", year, site.owner.name)}</p>
            </div>
        </footer>
    }
}
