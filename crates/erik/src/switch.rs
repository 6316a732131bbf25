//! Print-enabled flag
//!
//! One process-wide switch gates every helper in this crate. It starts on.

use std::sync::atomic::{AtomicBool, Ordering};

static PRINT_ENABLED: AtomicBool = AtomicBool::new(true);

/// Turn output on
pub fn enable() {
    set_enabled(true);
}

/// Turn output off
pub fn disable() {
    set_enabled(false);
}

pub fn set_enabled(enabled: bool) {
    PRINT_ENABLED.store(enabled, Ordering::SeqCst);
}

/// Whether helpers currently produce output
pub fn is_enabled() -> bool {
    PRINT_ENABLED.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_disable_then_enable() {
        disable();
        assert!(!is_enabled());

        enable();
        assert!(is_enabled());
    }

    #[test]
    #[serial]
    fn test_enable_is_idempotent() {
        enable();
        enable();
        assert!(is_enabled());
    }

    #[test]
    #[serial]
    fn test_toggle_visible_across_threads() {
        disable();
        let seen = std::thread::spawn(is_enabled).join().unwrap();
        assert!(!seen);
        enable();
    }
}
