use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbosity level
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

/// Log debug details to stderr if verbose mode is enabled
pub fn log_verbose(details: &str) {
    if VERBOSE.load(Ordering::Relaxed) {
        eprintln!("[DEBUG] {}", details);
    }
}
