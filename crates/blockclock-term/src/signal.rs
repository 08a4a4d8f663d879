// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Interrupt flag — the only thing a signal handler is allowed to touch.
//
// SIGINT (Ctrl-C) and SIGTERM land in `on_interrupt`, which stores `true`
// into a static `AtomicBool` and returns. No I/O, no allocation, no locks:
// the handler may have interrupted the very `write()` that was putting a
// frame on screen. All real cleanup happens back on the main path, when the
// tick loop next looks at the flag.
//
// The handler is installed without `SA_RESTART`, so a pending `nanosleep`
// returns early instead of being silently resumed.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag set by the interrupt handler.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

#[cfg(unix)]
extern "C" fn on_interrupt(_sig: libc::c_int) {
    INTERRUPTED.store(true, Ordering::Relaxed);
}

#[cfg(unix)]
fn install_handler(sig: libc::c_int) -> io::Result<()> {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_sigaction = on_interrupt as *const () as usize;
        sa.sa_flags = 0;
        libc::sigemptyset(&raw mut sa.sa_mask);
        if libc::sigaction(sig, &raw const sa, std::ptr::null_mut()) != 0 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

/// A handle on a shutdown-request flag.
///
/// [`install`](Self::install) wires the process-wide flag to SIGINT and
/// SIGTERM. Tests hand in their own static with
/// [`from_flag`](Self::from_flag) so they never race each other.
#[derive(Debug, Clone, Copy)]
pub struct Interrupt {
    flag: &'static AtomicBool,
}

impl Interrupt {
    /// Install the SIGINT/SIGTERM handlers and return a handle on their flag.
    ///
    /// Clears any request left over from before installation.
    ///
    /// # Errors
    ///
    /// Returns the OS error if `sigaction` fails.
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        INTERRUPTED.store(false, Ordering::Relaxed);
        install_handler(libc::SIGINT)?;
        install_handler(libc::SIGTERM)?;
        tracing::debug!("interrupt handlers installed");
        Ok(Self::from_flag(&INTERRUPTED))
    }

    /// Without POSIX signals the flag can only be raised programmatically.
    ///
    /// # Errors
    ///
    /// Infallible on this platform.
    #[cfg(not(unix))]
    pub fn install() -> io::Result<Self> {
        Ok(Self::from_flag(&INTERRUPTED))
    }

    /// Wrap an existing flag.
    #[must_use]
    pub const fn from_flag(flag: &'static AtomicBool) -> Self {
        Self { flag }
    }

    /// Whether shutdown has been requested.
    #[inline]
    #[must_use]
    pub fn is_requested(self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Request shutdown, exactly as the signal handler would.
    #[inline]
    pub fn request(self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Withdraw a pending request.
    #[inline]
    pub fn clear(self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    static LOCAL: AtomicBool = AtomicBool::new(false);

    #[test]
    fn request_and_clear() {
        let i = Interrupt::from_flag(&LOCAL);
        i.clear();
        assert!(!i.is_requested());
        i.request();
        assert!(i.is_requested());
        i.clear();
        assert!(!i.is_requested());
    }

    #[test]
    fn copies_share_the_flag() {
        static SHARED: AtomicBool = AtomicBool::new(false);
        let a = Interrupt::from_flag(&SHARED);
        let b = a;
        a.request();
        assert!(b.is_requested());
    }

    #[cfg(unix)]
    #[test]
    fn raised_sigint_sets_the_flag() {
        let i = Interrupt::install().unwrap();
        assert!(!i.is_requested());
        unsafe {
            assert_eq!(libc::raise(libc::SIGINT), 0);
        }
        assert!(i.is_requested());
        i.clear();
    }
}
