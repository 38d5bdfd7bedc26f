use anyhow::{Result, anyhow};
use colored::Colorize;
use folio_motion::contact::Field;
use folio_motion::{ContactForm, ContactPayload, SubmitOutcome, SubmitTransport};
use std::time::Duration;

use crate::diag::log_verbose;
use crate::sanitize::one_line;

/// Waits like the site's simulated mail backend, then reports success
#[derive(Debug, Clone, Copy)]
pub struct DelayedTransport {
    pub delay: Duration,
}

impl SubmitTransport for DelayedTransport {
    fn submit(&self, payload: ContactPayload) -> impl Future<Output = SubmitOutcome> {
        let delay = self.delay;
        async move {
            log_verbose(&format!(
                "Sending {} bytes from {}",
                payload.message.len(),
                one_line(&payload.email)
            ));
            tokio::time::sleep(delay).await;
            SubmitOutcome::Delivered
        }
    }
}

/// Run one submit and return the transitions it went through.
pub async fn transitions(
    form: &mut ContactForm,
    transport: &impl SubmitTransport,
) -> Result<Vec<String>> {
    let mut lines = vec![format!("State: {}", form.phase())];

    let payload = form.begin_submit().map_err(|e| anyhow!(e))?;
    lines.push(format!(
        "State: {} (from {} <{}>)",
        form.phase(),
        one_line(&payload.name),
        one_line(&payload.email)
    ));

    let outcome = transport.submit(payload).await;
    let cleared = form.finish_submit(&outcome);
    lines.push(match &outcome {
        SubmitOutcome::Delivered => format!("State: {} (delivered, fields cleared: {})", form.phase(), cleared),
        SubmitOutcome::Failed(reason) => {
            format!("State: {} (failed: {}, fields kept)", form.phase(), one_line(reason))
        }
    });
    Ok(lines)
}

pub async fn run(name: String, email: String, message: String, delay: Duration) -> Result<()> {
    let mut form = ContactForm::new();
    form.set(Field::Name, name);
    form.set(Field::Email, email);
    form.set(Field::Message, message);

    let lines = transitions(&mut form, &DelayedTransport { delay }).await?;
    for line in &lines {
        println!("{}", line);
    }
    println!("{}", "Message sent.".green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(name: &str, email: &str, message: &str) -> ContactForm {
        let mut form = ContactForm::new();
        form.set(Field::Name, name);
        form.set(Field::Email, email);
        form.set(Field::Message, message);
        form
    }

    struct Refusing;

    impl SubmitTransport for Refusing {
        fn submit(&self, _payload: ContactPayload) -> impl Future<Output = SubmitOutcome> {
            async { SubmitOutcome::Failed("mailbox full".to_string()) }
        }
    }

    #[tokio::test]
    async fn test_delivered_submit_clears_fields() {
        let mut form = filled("Ada", "ada@example.com", "Hello");
        let transport = DelayedTransport {
            delay: Duration::from_millis(1),
        };

        let lines = transitions(&mut form, &transport).await.unwrap();

        assert_eq!(lines[0], "State: idle");
        assert_eq!(lines[1], "State: submitting (from Ada <ada@example.com>)");
        assert_eq!(lines[2], "State: idle (delivered, fields cleared: true)");
        assert!(Field::ALL.iter().all(|f| form.value(*f).is_empty()));
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_fields() {
        let mut form = filled("Ada", "ada@example.com", "Hello");

        let lines = transitions(&mut form, &Refusing).await.unwrap();

        assert!(lines[2].contains("failed: mailbox full"));
        assert_eq!(form.value(Field::Message), "Hello");
    }

    #[tokio::test]
    async fn test_missing_field_is_rejected() {
        let mut form = filled("Ada", "", "Hello");

        let err = transitions(&mut form, &Refusing).await.unwrap_err();

        assert_eq!(err.to_string(), "The email field is required");
        assert_eq!(form.phase().to_string(), "idle");
    }
}
