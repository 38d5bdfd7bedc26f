//! Contact form state machine.
//!
//! `Idle -> Submitting` when every field has content, `Submitting -> Idle`
//! once the transport answers. A delivered message clears the form; a
//! failed one leaves the fields for another try.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::easing::Ease;
use crate::tween::{Repeat, Tween};
use crate::visual::Visual;

/// Delay of the simulated transport used by the site
pub const SIMULATED_DELAY: Duration = Duration::from_secs(2);
pub const PULSE_SCALE: f64 = 1.1;
pub const PULSE_DURATION: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Email => write!(f, "email"),
            Field::Message => write!(f, "message"),
        }
    }
}

/// What the transport receives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub message: String,
    pub submitting: bool,
}

impl FormState {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
}

impl fmt::Display for FormPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormPhase::Idle => write!(f, "idle"),
            FormPhase::Submitting => write!(f, "submitting"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Delivered,
    Failed(String),
}

/// Why a submit never left `Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    MissingField(Field),
    AlreadySubmitting,
}

impl fmt::Display for SubmitRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitRejection::MissingField(field) => write!(f, "The {} field is required", field),
            SubmitRejection::AlreadySubmitting => write!(f, "A message is already being sent"),
        }
    }
}

impl std::error::Error for SubmitRejection {}

/// Delivers a contact message.
pub trait SubmitTransport {
    fn submit(&self, payload: ContactPayload) -> impl Future<Output = SubmitOutcome>;
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    state: FormState,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn phase(&self) -> FormPhase {
        if self.state.submitting {
            FormPhase::Submitting
        } else {
            FormPhase::Idle
        }
    }

    pub fn value(&self, field: Field) -> &str {
        self.state.value(field)
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.state.slot(field) = value.into();
    }

    /// Move to `Submitting` and hand back the payload to send.
    /// Whitespace-only fields count as empty.
    pub fn begin_submit(&mut self) -> Result<ContactPayload, SubmitRejection> {
        if self.state.submitting {
            return Err(SubmitRejection::AlreadySubmitting);
        }
        if let Some(field) = Field::ALL
            .into_iter()
            .find(|f| self.state.value(*f).trim().is_empty())
        {
            return Err(SubmitRejection::MissingField(field));
        }
        self.state.submitting = true;
        Ok(ContactPayload {
            name: self.state.name.clone(),
            email: self.state.email.clone(),
            message: self.state.message.clone(),
        })
    }

    /// Back to `Idle`. Returns whether the fields were cleared.
    pub fn finish_submit(&mut self, outcome: &SubmitOutcome) -> bool {
        self.state.submitting = false;
        match outcome {
            SubmitOutcome::Delivered => {
                self.state = FormState::default();
                true
            }
            SubmitOutcome::Failed(_) => false,
        }
    }
}

/// Run one full submit against `transport`.
pub async fn submit_with<T: SubmitTransport>(
    form: &mut ContactForm,
    transport: &T,
) -> Result<SubmitOutcome, SubmitRejection> {
    let payload = form.begin_submit()?;
    let outcome = transport.submit(payload).await;
    form.finish_submit(&outcome);
    Ok(outcome)
}

/// Brief grow-and-return on the submit button after a delivered message
pub fn success_pulse() -> Tween {
    Tween::new(Visual::IDENTITY, Visual::IDENTITY.scale(PULSE_SCALE), PULSE_DURATION)
        .repeat(Repeat::Count(1))
        .yoyo(true)
        .ease(Ease::Power2InOut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    struct FakeTransport {
        outcome: SubmitOutcome,
        sent: RefCell<Vec<ContactPayload>>,
    }

    impl FakeTransport {
        fn answering(outcome: SubmitOutcome) -> Self {
            Self {
                outcome,
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl SubmitTransport for FakeTransport {
        async fn submit(&self, payload: ContactPayload) -> SubmitOutcome {
            self.sent.borrow_mut().push(payload);
            self.outcome.clone()
        }
    }

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set(Field::Name, "Ada");
        form.set(Field::Email, "ada@example.com");
        form.set(Field::Message, "Hello");
        form
    }

    #[test]
    fn test_delivered_clears_fields() {
        let mut form = filled();
        let transport = FakeTransport::answering(SubmitOutcome::Delivered);
        let outcome = block_on(submit_with(&mut form, &transport)).unwrap();
        assert_eq!(outcome, SubmitOutcome::Delivered);
        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(*form.state(), FormState::default());
        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].name, "Ada");
        assert_eq!(sent[0].email, "ada@example.com");
        assert_eq!(sent[0].message, "Hello");
    }

    #[test]
    fn test_submitting_in_between() {
        let mut form = filled();
        let payload = form.begin_submit().unwrap();
        assert_eq!(payload.message, "Hello");
        assert_eq!(form.phase(), FormPhase::Submitting);
        assert_eq!(form.begin_submit(), Err(SubmitRejection::AlreadySubmitting));
        assert!(form.finish_submit(&SubmitOutcome::Delivered));
        assert_eq!(form.phase(), FormPhase::Idle);
    }

    #[test]
    fn test_failure_keeps_fields() {
        let mut form = filled();
        let transport = FakeTransport::answering(SubmitOutcome::Failed("offline".into()));
        let outcome = block_on(submit_with(&mut form, &transport)).unwrap();
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(form.value(Field::Name), "Ada");
        assert_eq!(form.value(Field::Message), "Hello");
    }

    #[test]
    fn test_empty_field_rejected() {
        let mut form = filled();
        form.set(Field::Email, "   ");
        let transport = FakeTransport::answering(SubmitOutcome::Delivered);
        let err = block_on(submit_with(&mut form, &transport)).unwrap_err();
        assert_eq!(err, SubmitRejection::MissingField(Field::Email));
        assert_eq!(err.to_string(), "The email field is required");
        assert_eq!(form.phase(), FormPhase::Idle);
        assert!(transport.sent.borrow().is_empty());
    }

    #[test]
    fn test_success_pulse_returns_to_rest() {
        let pulse = success_pulse();
        assert_eq!(pulse.total_duration(), Some(0.4));
        assert!((pulse.sample(0.2).visual.scale - PULSE_SCALE).abs() < 1e-9);
        // Symmetric ease: halfway up is halfway in scale
        assert!((pulse.sample(0.1).visual.scale - 1.05).abs() < 1e-9);
        let end = pulse.sample(0.4);
        assert!(end.finished);
        assert_eq!(end.visual.scale, 1.0);
    }
}
