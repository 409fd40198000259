// TermRaster
// copyright zipxing@hotmail.com 2022～2025

// Installs real signal and panic hooks, so it lives in its own test binary.
#![cfg(unix)]

use std::sync::atomic::{AtomicU32, Ordering};
use term_raster::{event, Canvas, RenderMode};

static RESTORES: AtomicU32 = AtomicU32::new(0);

fn count_restore() {
    RESTORES.fetch_add(1, Ordering::SeqCst);
}

#[test]
fn handlers_install_once_per_process() {
    assert!(!event::handlers_installed());
    // the size query may fail without a tty, the handlers are installed first
    let _ = Canvas::create_fullscreen_reserving(RenderMode::Braille, 1);
    assert!(event::handlers_installed());

    assert!(event::install_handlers().is_ok());
    assert!(event::install_handlers().is_ok());
    assert!(event::handlers_installed());

    // the panic hook runs the cleanups exactly once per panic
    event::register_cleanup(count_restore).unwrap();
    let r = std::panic::catch_unwind(|| panic!("frame loop failure"));
    assert!(r.is_err());
    assert_eq!(RESTORES.load(Ordering::SeqCst), 1);

    event::register_cleanup(count_restore).unwrap();
    assert!(event::install_handlers().is_ok());
    let r = std::panic::catch_unwind(|| panic!("second failure"));
    assert!(r.is_err());
    assert_eq!(RESTORES.load(Ordering::SeqCst), 2);
    assert!(!event::is_display_active());
}
