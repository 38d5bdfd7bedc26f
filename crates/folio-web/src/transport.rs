use std::time::Duration;

use folio_motion::contact::SIMULATED_DELAY;
use folio_motion::{ContactPayload, SubmitOutcome, SubmitTransport};
use futures::channel::oneshot;
use leptos::prelude::set_timeout;

use crate::diag::log_verbose;

/// Stand-in for a real mail backend: waits, then reports success.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedTransport {
    pub delay: Duration,
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self {
            delay: SIMULATED_DELAY,
        }
    }
}

impl SubmitTransport for SimulatedTransport {
    fn submit(&self, payload: ContactPayload) -> impl Future<Output = SubmitOutcome> {
        let delay = self.delay;
        async move {
            log_verbose(&format!("Sending message from {} <{}>", payload.name, payload.email));
            sleep(delay).await;
            SubmitOutcome::Delivered
        }
    }
}

async fn sleep(duration: Duration) {
    let (tx, rx) = oneshot::channel::<()>();
    set_timeout(
        move || {
            let _ = tx.send(());
        },
        duration,
    );
    let _ = rx.await;
}
