// SPDX-License-Identifier: MIT
//
// Terminal control — raw display mode and guaranteed-once restore.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr), isatty, and raw fd writes. These are the standard POSIX
// interfaces for terminal control — there is no safe alternative. Each
// unsafe block is minimal.
#![allow(unsafe_code)]
//
// "Raw display mode" here is deliberately mild: echo and canonical line
// buffering off, cursor hidden. Output post-processing stays on, so `\n`
// still means CR LF and the frame can be written as plain lines.
//
// The original termios lives in exactly one place, a global backup behind a
// `Mutex`. Whoever restores the terminal *takes* it out:
//
//   RawDisplay::restore  — normal return, error return, Drop during unwind
//   panic hook           — panics, before the unwinding reaches Drop
//
// so termios is written back exactly once no matter which path gets there
// first, and a second `RawDisplay` cannot be entered while one is live.

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, Once, PoisonError};

use crate::ansi;

// ─── Terminal Queries ───────────────────────────────────────────────────────

/// Check whether stdin is connected to a terminal (TTY).
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Restore ────────────────────────────────────────────────────────────────

/// Something that puts the terminal back the way it found it.
///
/// The tick loop calls [`restore`](Self::restore) exactly once when it
/// leaves `Running`. Implementations must tolerate repeated calls: every
/// call after the first is a no-op.
pub trait Restore {
    /// Restore the original terminal state.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the restore sequence or resetting the
    /// terminal attributes fails.
    fn restore(&mut self) -> io::Result<()>;
}

// ─── Global Backup ──────────────────────────────────────────────────────────

/// The one copy of the original termios, taken by whichever path restores.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

#[cfg(unix)]
fn backup() -> MutexGuard<'static, Option<libc::termios>> {
    // A poisoned lock still holds a valid termios; restoring matters more.
    TERMIOS_BACKUP.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(unix)]
fn apply_termios(termios: &libc::termios) -> io::Result<()> {
    if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, termios) } != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

// ─── Panic-Safe Restore ─────────────────────────────────────────────────────

/// Written straight to fd 1 by the panic hook: reset SGR, show cursor.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[0m\x1b[?25h";

/// Panic hook guard — ensures the hook is installed at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the terminal before printing the error.
///
/// Without it a panic leaves the shell with echo off and no cursor, and the
/// panic message lands in a terminal nobody can see into.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();
            original(info);
        }));
    });
}

/// Restore from the global backup, bypassing Rust's stdout lock.
///
/// Does nothing if the terminal was already restored (or never entered).
#[cfg(unix)]
fn emergency_restore() {
    let Some(original) = backup().take() else {
        return;
    };
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }
    let _ = apply_termios(&original);
}

#[cfg(not(unix))]
fn emergency_restore() {
    let _ = io::stdout().write_all(EMERGENCY_RESTORE);
    let _ = io::stdout().flush();
}

// ─── RawDisplay ─────────────────────────────────────────────────────────────

/// Scoped handle on raw display mode.
///
/// [`enter`](Self::enter) turns off echo and canonical mode and hides the
/// cursor. [`restore`](Restore::restore) undoes both; it runs at most once
/// and is also run by `Drop`.
///
/// # Example
///
/// ```no_run
/// use blockclock_term::terminal::{RawDisplay, Restore};
///
/// let mut display = RawDisplay::enter()?;
/// // ... draw frames ...
/// display.restore()?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct RawDisplay {
    active: bool,
}

impl RawDisplay {
    /// Capture the current terminal settings and enter raw display mode.
    ///
    /// # Errors
    ///
    /// Fails if stdin is not a terminal, if another `RawDisplay` is already
    /// live, or if the terminal attributes cannot be read or written.
    pub fn enter() -> io::Result<Self> {
        if !is_tty() {
            return Err(io::Error::other("stdin is not a terminal"));
        }

        install_panic_hook();

        let mut display = Self { active: false };
        display.enable_raw_mode()?;
        // From here on Drop restores, even if hiding the cursor fails.
        display.active = true;

        let mut out = io::stdout().lock();
        ansi::cursor_hide(&mut out)?;
        out.flush()?;

        tracing::debug!("entered raw display mode");
        Ok(display)
    }

    /// Whether the terminal is still in raw display mode.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[cfg(unix)]
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        let mut saved = backup();
        if saved.is_some() {
            return Err(io::Error::other("raw display mode is already active"));
        }

        let mut termios: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(libc::STDIN_FILENO, &raw mut termios) } != 0 {
            return Err(io::Error::last_os_error());
        }

        let original = termios;
        termios.c_lflag &= !(libc::ECHO | libc::ICANON);
        apply_termios(&termios)?;

        *saved = Some(original);
        Ok(())
    }

    #[cfg(not(unix))]
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        Ok(())
    }

    #[cfg(unix)]
    fn disable_raw_mode() -> io::Result<()> {
        // Taken by the panic hook already if we are unwinding.
        let Some(original) = backup().take() else {
            return Ok(());
        };
        apply_termios(&original)
    }

    #[cfg(not(unix))]
    fn disable_raw_mode() -> io::Result<()> {
        Ok(())
    }
}

impl Restore for RawDisplay {
    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        // Flip first: a failed restore is not retried with stale state.
        self.active = false;

        let mut out = io::stdout().lock();
        let shown = ansi::reset(&mut out)
            .and_then(|()| ansi::cursor_show(&mut out))
            .and_then(|()| out.flush());
        drop(out);

        let restored = Self::disable_raw_mode();
        tracing::debug!("left raw display mode");
        shown.and(restored)
    }
}

impl Drop for RawDisplay {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!(error = %e, "failed to restore terminal");
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_tty_does_not_panic() {
        let _ = is_tty();
    }

    #[test]
    fn emergency_restore_is_valid_utf8() {
        std::str::from_utf8(EMERGENCY_RESTORE).unwrap();
    }

    #[test]
    fn emergency_restore_shows_cursor_and_resets() {
        let s = std::str::from_utf8(EMERGENCY_RESTORE).unwrap();
        assert!(s.contains(ansi::CURSOR_SHOW), "must show cursor");
        assert!(s.contains(ansi::RESET), "must reset SGR attributes");
    }

    #[test]
    fn enter_fails_fast_without_tty() {
        if is_tty() {
            return;
        }
        let err = RawDisplay::enter().unwrap_err();
        assert!(err.to_string().contains("not a terminal"));
    }

    #[test]
    fn inactive_display_restore_is_noop() {
        let mut display = RawDisplay { active: false };
        display.restore().unwrap();
        display.restore().unwrap();
        assert!(!display.is_active());
    }

    // Only meaningful when the test runner is attached to a terminal. One
    // test covers the whole lifecycle so no two tests hold the backup.
    #[test]
    fn enter_restore_lifecycle_on_tty() {
        if !is_tty() {
            return;
        }
        let mut display = RawDisplay::enter().unwrap();
        assert!(display.is_active());

        let second = RawDisplay::enter();
        assert!(second.is_err(), "only one raw display may be live");

        display.restore().unwrap();
        assert!(!display.is_active());
        display.restore().unwrap();

        let again = RawDisplay::enter().unwrap();
        drop(again);
    }
}
