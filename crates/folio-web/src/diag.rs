use leptos::logging::{log, warn};
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbosity level
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

/// Log debug details to the console if verbose mode is enabled
pub fn log_verbose(details: &str) {
    if VERBOSE.load(Ordering::Relaxed) {
        log!("[DEBUG] {}", details);
    }
}

/// Always shown; for conditions the page recovers from on its own
pub fn log_warning(details: &str) {
    warn!("[folio] {}", details);
}
