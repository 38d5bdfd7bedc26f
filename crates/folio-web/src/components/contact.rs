use folio_motion::contact::{Field, SubmitOutcome, success_pulse};
use folio_motion::nav::Anchor;
use folio_motion::sections::{contact_fields, contact_socials, contact_title};
use folio_motion::{AnimationController, ContactForm, SiteConfig, SubmitTransport, Visual};
use leptos::ev::{Event, SubmitEvent};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::diag::log_verbose;
use crate::motion::{Handles, LoopSlot, RevealGroup, Stage, use_reveals};
use crate::transport::SimulatedTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ContactEl {
    Title,
    Form,
    Row(usize),
    Socials,
    Social(usize),
}

/// Fields plus the submit button
const FORM_ROWS: usize = Field::ALL.len() + 1;

#[component]
pub fn Contact() -> impl IntoView {
    let site = expect_context::<SiteConfig>();
    let socials = site.socials.clone();
    let social_count = socials.len();

    let mut keys = vec![ContactEl::Title, ContactEl::Form, ContactEl::Socials];
    keys.extend((0..FORM_ROWS).map(ContactEl::Row));
    keys.extend((0..social_count).map(ContactEl::Social));
    let handles = Handles::new(keys);
    let stage = Stage::new([]);
    let groups = vec![
        RevealGroup::new(contact_title(), ContactEl::Title, [ContactEl::Title]),
        RevealGroup::new(contact_fields(), ContactEl::Form, (0..FORM_ROWS).map(ContactEl::Row)),
        RevealGroup::new(contact_socials(), ContactEl::Socials, (0..social_count).map(ContactEl::Social)),
    ];
    use_reveals(Anchor::Contact.id(), stage, handles, groups);

    let form = RwSignal::new(ContactForm::new());
    let notice = RwSignal::new(None::<String>);
    let pulse = RwSignal::new(Visual::IDENTITY);
    let pulse_frames = LoopSlot::new();

    let play_pulse = move || {
        let mut controller = AnimationController::playing((), success_pulse());
        pulse_frames.run(move |dt| {
            let frame = controller.tick(dt);
            if let Some(visual) = frame.get(()) {
                pulse.set(visual);
            }
            !frame.settled
        });
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(started) = form.try_update(|f| f.begin_submit()) else {
            return;
        };
        let payload = match started {
            Ok(payload) => payload,
            Err(rejection) => {
                log_verbose(&format!("Submit rejected: {}", rejection));
                notice.set(Some(rejection.to_string()));
                return;
            }
        };
        notice.set(None);
        spawn_local(async move {
            let outcome = SimulatedTransport::default().submit(payload).await;
            // The section may have unmounted while waiting
            let Some(cleared) = form.try_update(|f| f.finish_submit(&outcome)) else {
                return;
            };
            match outcome {
                SubmitOutcome::Delivered => {
                    log_verbose(&format!("Message delivered, fields cleared: {}", cleared));
                    notice.set(Some("Thanks! Your message has been sent.".to_string()));
                    play_pulse();
                }
                SubmitOutcome::Failed(reason) => {
                    log_verbose(&format!("Message not delivered: {}", reason));
                    notice.set(Some("Sending failed, please try again.".to_string()));
                }
            }
        });
    };

    let submitting = move || form.with(|f| f.state().submitting);

    let field_row = move |index: usize, field: Field| {
        let row = ContactEl::Row(index);
        let label = match field {
            Field::Name => "Your Name",
            Field::Email => "Email Address",
            Field::Message => "Message",
        };
        let value = move || form.with(|f| f.value(field).to_string());
        let input = move |ev: Event| form.update(|f| f.set(field, event_target_value(&ev)));
        let control = match field {
            Field::Message => view! {
                <textarea
                    name=field.to_string()
                    rows="5"
                    placeholder="Tell me about your project..."
                    prop:value=value
                    on:input=input
                    required
                ></textarea>
            }
            .into_any(),
            Field::Email => view! {
                <input
                    type="email"
                    name=field.to_string()
                    placeholder="you@example.com"
                    prop:value=value
                    on:input=input
                    required
                />
            }
            .into_any(),
            Field::Name => view! {
                <input
                    type="text"
                    name=field.to_string()
                    placeholder="John Doe"
                    prop:value=value
                    on:input=input
                    required
                />
            }
            .into_any(),
        };
        view! {
            <div node_ref=handles.node(row) class="form-row" style=move || stage.style(row)>
                <label>
                    <span class="form-label">{label}</span>
                    {control}
                </label>
            </div>
        }
    };

    let submit_row = ContactEl::Row(Field::ALL.len());

    view! {
        <section id=Anchor::Contact.id() class="contact">
            <div class="section-inner">
                <div node_ref=handles.node(ContactEl::Title) style=move || stage.style(ContactEl::Title)>
                    <h2 class="section-title">"Let's " <span class="text-gradient">"Work Together"</span></h2>
                </div>

                <div class="contact-grid">
                    <div node_ref=handles.node(ContactEl::Form) class="contact-form-wrap">
                        <form class="contact-form glass-card" on:submit=on_submit>
                            {Field::ALL
                                .into_iter()
                                .enumerate()
                                .map(|(i, field)| field_row(i, field))
                                .collect_view()}
                            <div node_ref=handles.node(submit_row) class="form-row" style=move || stage.style(submit_row)>
                                <button
                                    type="submit"
                                    class="btn-neon contact-submit"
                                    style=move || pulse.get().to_css()
                                    disabled=submitting
                                >
                                    {move || if submitting() { "Sending..." } else { "Send Message" }}
                                </button>
                            </div>
                            <Show when=move || notice.with(Option::is_some)>
                                <p class="form-notice" role="status">
                                    {move || notice.get().unwrap_or_default()}
                                </p>
                            </Show>
                        </form>
                    </div>

                    <aside class="contact-info">
                        <div class="glass-card info-card">
                            <h3>"Get in touch"</h3>
                            <p>
                                <a href=format!("mailto:{}", site.contact.email)>{site.contact.email.clone()}</a>
                            </p>
                            <p>{site.contact.location.clone()}</p>
                            <p>{site.contact.response_time.clone()}</p>
                            <p class="availability">{site.contact.availability.clone()}</p>
                        </div>

                        <div node_ref=handles.node(ContactEl::Socials) class="contact-socials">
                            {socials
                                .into_iter()
                                .enumerate()
                                .map(|(i, social)| {
                                    let el = ContactEl::Social(i);
                                    let initial = social.name.chars().next().map(String::from).unwrap_or_default();
                                    view! {
                                        <div node_ref=handles.node(el) class="social-item" style=move || stage.style(el)>
                                            <a
                                                class="social-link glass-card"
                                                href=social.url
                                                target="_blank"
                                                rel="noopener noreferrer"
                                                aria-label=social.name
                                            >
                                                {initial}
                                            </a>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </aside>
                </div>
            </div>
        </section>
    }
}
