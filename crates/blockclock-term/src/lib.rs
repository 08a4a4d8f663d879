// SPDX-License-Identifier: MIT
//
// blockclock-term — terminal plumbing for blockclock.
//
// Everything the clock needs from the terminal and nothing more: a handful
// of ANSI sequences, a raw display handle that hides the cursor and turns
// off echo for exactly as long as it lives, an interrupt flag that a signal
// handler can flip without touching anything else, and a tick loop that
// redraws a frame in place by walking the cursor back up over it.
//
// No TUI framework, no alternate screen. The clock draws inline, below the
// shell prompt, and leaves the last frame on screen when it exits.

pub mod ansi;
pub mod frame;
pub mod signal;
pub mod style;
pub mod terminal;
pub mod ticker;
