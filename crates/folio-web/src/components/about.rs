use folio_motion::SiteConfig;
use folio_motion::nav::Anchor;
use folio_motion::sections::{about_content, about_image, skill_bars, skill_cards};
use leptos::prelude::*;

use crate::motion::{Handles, RevealGroup, Stage, use_reveals};

/// Animated elements of the about section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum AboutEl {
    Section,
    Image,
    Content,
    Paragraph(usize),
    Grid,
    Card(usize),
    Bar(usize),
}

#[component]
pub fn About() -> impl IntoView {
    let site = expect_context::<SiteConfig>();
    let skills = site.skills.clone();
    let levels = site.skill_levels();

    // Bio paragraphs plus the stats row enter as one staggered group
    let blocks = site.about.bio.len() + 1;

    let mut keys = vec![AboutEl::Section, AboutEl::Image, AboutEl::Content, AboutEl::Grid];
    keys.extend((0..blocks).map(AboutEl::Paragraph));
    keys.extend((0..skills.len()).flat_map(|i| [AboutEl::Card(i), AboutEl::Bar(i)]));
    let handles = Handles::new(keys);

    let stage = Stage::new([]);
    let groups = vec![
        RevealGroup::new(about_image(), AboutEl::Section, [AboutEl::Image]),
        RevealGroup::new(about_content(), AboutEl::Content, (0..blocks).map(AboutEl::Paragraph)),
        RevealGroup::new(skill_cards(), AboutEl::Grid, (0..skills.len()).map(AboutEl::Card)),
        RevealGroup::new(skill_bars(&levels), AboutEl::Grid, (0..skills.len()).map(AboutEl::Bar)),
    ];
    use_reveals(Anchor::About.id(), stage, handles, groups);

    let bio_count = site.about.bio.len();

    view! {
        <section id=Anchor::About.id() class="about">
            <div node_ref=handles.node(AboutEl::Section) class="section-inner">
                <div class="about-grid">
                    <div
                        node_ref=handles.node(AboutEl::Image)
                        class="about-image"
                        style=move || stage.style(AboutEl::Image)
                    >
                        <div class="glass-card about-portrait">
                            <div class="about-monogram text-gradient">
                                {site.owner.name.chars().next().map(String::from).unwrap_or_default()}
                            </div>
                        </div>
                    </div>

                    <div node_ref=handles.node(AboutEl::Content) class="about-content">
                        <h2 class="section-title">"About " <span class="text-gradient">"Me"</span></h2>
                        {site
                            .about
                            .bio
                            .iter()
                            .enumerate()
                            .map(|(i, paragraph)| {
                                let el = AboutEl::Paragraph(i);
                                view! {
                                    <div node_ref=handles.node(el) class="about-bio" style=move || stage.style(el)>
                                        <p>{paragraph.clone()}</p>
                                    </div>
                                }
                            })
                            .collect_view()}
                        {
                            let el = AboutEl::Paragraph(bio_count);
                            view! {
                                <div node_ref=handles.node(el) class="about-stats" style=move || stage.style(el)>
                                    {site
                                        .about
                                        .stats
                                        .iter()
                                        .map(|stat| {
                                            view! {
                                                <div class="stat glass-card">
                                                    <div class="stat-value text-gradient">{stat.value.clone()}</div>
                                                    <div class="stat-label">{stat.label.clone()}</div>
                                                </div>
                                            }
                                        })
                                        .collect_view()}
                                </div>
                            }
                        }
                    </div>
                </div>

                <h3 class="skills-title">"Skills & " <span class="text-gradient">"Expertise"</span></h3>
                <div node_ref=handles.node(AboutEl::Grid) class="skills-grid">
                    {skills
                        .into_iter()
                        .enumerate()
                        .map(|(i, skill)| {
                            let card = AboutEl::Card(i);
                            let bar = AboutEl::Bar(i);
                            view! {
                                <div node_ref=handles.node(card) class="skill-card glass-card" style=move || stage.style(card)>
                                    <div class="skill-head">
                                        <span class="skill-name">{skill.name}</span>
                                        <span class="skill-level">{format!("{}%", skill.level)}</span>
                                    </div>
                                    <div class="skill-track">
                                        <div node_ref=handles.node(bar) class="skill-bar" style=move || stage.style(bar)></div>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}
