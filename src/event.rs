// TermRaster
// copyright zipxing@hotmail.com 2022～2025

//! Process-wide terminal state.
//!
//! The terminal is shared by the whole process and touched from signal
//! handlers, so everything here is a plain atomic: no locks and no allocation
//! happen in handler context.
//!
//! - current size in columns/rows, updated on SIGWINCH
//! - a "size changed" flag, set by the resize handler and consumed once by
//!   [`was_resized`]
//! - a fixed-size registry of cleanup callbacks run before the terminal is
//!   restored
//! - a one-time guard so handlers and exit/panic hooks are installed at most once
//!
//! On SIGINT, SIGTERM, SIGHUP and SIGQUIT the handler runs the cleanup
//! callbacks, writes [`RESTORE_SEQUENCE`] straight to fd 1 and then re-raises the
//! signal with its default disposition.

use crate::{
    error::{RasterError, Result},
    render::adapter::{cross::CrosstermAdapter, Adapter},
};
use log::{info, warn};
use std::sync::atomic::{AtomicBool, AtomicU16, AtomicUsize, Ordering};

/// mouse tracking off, cursor on, colors reset, main screen back
pub const RESTORE_SEQUENCE: &str =
    "\x1b[?1000l\x1b[?1002l\x1b[?1003l\x1b[?1006l\x1b[?25h\x1b[0m\x1b[?1049l";

pub const MAX_CLEANUP_CALLBACKS: usize = 16;

/// A cleanup callback. Also runs in signal context, so it must be async-signal-safe.
pub type CleanupFn = fn();

static TERM_COLS: AtomicU16 = AtomicU16::new(80);
static TERM_ROWS: AtomicU16 = AtomicU16::new(24);
static SIZE_CHANGED: AtomicBool = AtomicBool::new(false);

static HANDLERS_INSTALLED: AtomicBool = AtomicBool::new(false);
static DISPLAY_ACTIVE: AtomicBool = AtomicBool::new(false);

// fn pointers stored as usize, 0 is an empty slot
static CLEANUP_FNS: [AtomicUsize; MAX_CLEANUP_CALLBACKS] =
    [const { AtomicUsize::new(0) }; MAX_CLEANUP_CALLBACKS];
static CLEANUP_LEN: AtomicUsize = AtomicUsize::new(0);

/// Last known terminal size (columns, rows).
pub fn term_size() -> (u16, u16) {
    (
        TERM_COLS.load(Ordering::Relaxed),
        TERM_ROWS.load(Ordering::Relaxed),
    )
}

pub fn term_width() -> u16 {
    TERM_COLS.load(Ordering::Relaxed)
}

pub fn term_height() -> u16 {
    TERM_ROWS.load(Ordering::Relaxed)
}

/// Ask the terminal for its size and remember it.
pub fn query_term_size() -> Result<(u16, u16)> {
    let (cols, rows) = crossterm::terminal::size().map_err(RasterError::TerminalSize)?;
    TERM_COLS.store(cols, Ordering::Relaxed);
    TERM_ROWS.store(rows, Ordering::Relaxed);
    Ok((cols, rows))
}

/// Record a new terminal size and raise the "size changed" flag.
/// Called by the SIGWINCH handler, usable directly by hosts with their own
/// resize source.
pub fn notify_resize(cols: u16, rows: u16) {
    TERM_COLS.store(cols, Ordering::Relaxed);
    TERM_ROWS.store(rows, Ordering::Relaxed);
    SIZE_CHANGED.store(true, Ordering::Release);
}

/// True once per resize, then false until the next one.
pub fn was_resized() -> bool {
    SIZE_CHANGED.swap(false, Ordering::AcqRel)
}

/// Add a callback to run before the terminal is restored.
pub fn register_cleanup(f: CleanupFn) -> Result<()> {
    let idx = CLEANUP_LEN.fetch_add(1, Ordering::AcqRel);
    if idx >= MAX_CLEANUP_CALLBACKS {
        CLEANUP_LEN.fetch_sub(1, Ordering::AcqRel);
        return Err(RasterError::CleanupRegistryFull(MAX_CLEANUP_CALLBACKS));
    }
    CLEANUP_FNS[idx].store(f as usize, Ordering::Release);
    Ok(())
}

/// Run every registered callback once, in registration order.
/// Afterwards the registry is empty again.
pub fn run_cleanups() {
    let raw_len = CLEANUP_LEN.load(Ordering::Acquire);
    let len = raw_len.min(MAX_CLEANUP_CALLBACKS);
    for slot in &CLEANUP_FNS[..len] {
        let p = slot.swap(0, Ordering::AcqRel);
        if p != 0 {
            // SAFETY: non-zero slots only ever hold values stored from a `CleanupFn`
            let f = unsafe { std::mem::transmute::<usize, CleanupFn>(p) };
            f();
        }
    }
    // a registration racing with this run bumps the length and keeps its slot
    let _ = CLEANUP_LEN.compare_exchange(raw_len, 0, Ordering::AcqRel, Ordering::Acquire);
}

pub fn handlers_installed() -> bool {
    HANDLERS_INSTALLED.load(Ordering::Acquire)
}

pub fn mark_display_active() {
    DISPLAY_ACTIVE.store(true, Ordering::Release);
}

pub fn is_display_active() -> bool {
    DISPLAY_ACTIVE.load(Ordering::Acquire)
}

/// Run cleanups and restore the terminal if a display was initialized.
/// Safe to call more than once.
pub fn restore_terminal() {
    run_cleanups();
    if DISPLAY_ACTIVE.swap(false, Ordering::AcqRel) {
        if let Err(e) = CrosstermAdapter::stdout().reset() {
            warn!("terminal restore failed: {}", e);
        } else {
            info!("terminal restored");
        }
    }
}

/// Install signal handlers, the exit hook and the panic hook, once per process.
pub fn install_handlers() -> Result<()> {
    if HANDLERS_INSTALLED
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        return Ok(());
    }
    if let Err(e) = platform::install() {
        HANDLERS_INSTALLED.store(false, Ordering::Release);
        return Err(e);
    }
    install_panic_hook();
    info!("terminal handlers installed");
    Ok(())
}

fn install_panic_hook() {
    let prev = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        prev(info);
    }));
}

#[cfg(unix)]
mod platform {
    use super::{notify_resize, restore_terminal, run_cleanups, RESTORE_SEQUENCE};
    use crate::error::{RasterError, Result};
    use signal_hook::{
        consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM, SIGWINCH},
        low_level,
    };
    use std::mem::MaybeUninit;

    pub(super) fn install() -> Result<()> {
        for sig in [SIGINT, SIGTERM, SIGHUP, SIGQUIT] {
            // SAFETY: the action only touches atomics, calls write(2) and re-raises
            unsafe { low_level::register(sig, move || on_terminate(sig)) }
                .map_err(|source| RasterError::SignalHandler { signal: sig, source })?;
        }
        // SAFETY: ioctl(2) plus atomic stores
        unsafe { low_level::register(SIGWINCH, on_winch) }.map_err(|source| {
            RasterError::SignalHandler {
                signal: SIGWINCH,
                source,
            }
        })?;
        // SAFETY: registering a plain extern "C" fn with no captured state
        if unsafe { libc::atexit(restore_at_exit) } != 0 {
            log::warn!("atexit registration failed, relying on explicit cleanup");
        }
        if let Some((cols, rows)) = winsize() {
            notify_resize(cols, rows);
        }
        Ok(())
    }

    fn on_terminate(sig: i32) {
        run_cleanups();
        // SAFETY: write(2) is async-signal-safe, the buffer is a static str
        unsafe {
            libc::write(
                libc::STDOUT_FILENO,
                RESTORE_SEQUENCE.as_ptr() as *const libc::c_void,
                RESTORE_SEQUENCE.len(),
            );
        }
        let _ = low_level::emulate_default_handler(sig);
    }

    fn on_winch() {
        if let Some((cols, rows)) = winsize() {
            notify_resize(cols, rows);
        }
    }

    extern "C" fn restore_at_exit() {
        restore_terminal();
    }

    /// Query terminal size via ioctl(TIOCGWINSZ).
    fn winsize() -> Option<(u16, u16)> {
        let mut ws = MaybeUninit::<libc::winsize>::uninit();
        // SAFETY: TIOCGWINSZ fills a winsize on success
        unsafe {
            if libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, ws.as_mut_ptr()) == 0 {
                let ws = ws.assume_init();
                if ws.ws_col > 0 && ws.ws_row > 0 {
                    return Some((ws.ws_col, ws.ws_row));
                }
            }
        }
        None
    }
}

#[cfg(not(unix))]
mod platform {
    use crate::error::Result;

    /// No POSIX signals here; restoration relies on the panic hook,
    /// `TerminalGuard` and explicit cleanup.
    pub(super) fn install() -> Result<()> {
        super::query_term_size().map(|_| ())
    }
}
