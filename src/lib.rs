//! # curses
//!
//! A thin binding to the ncurses terminal library.
//!
//! Every native call is wrapped by one method that turns the C sentinel
//! (`ERR`, or a null `WINDOW *`) into a [`Result`]. The binding itself
//! implements no terminal logic; it sits on top of a [`Native`] backend:
//!
//! - [`ffi::Ncurses`] links the system `libncurses` (feature `ncurses`).
//! - [`emulator::Emulator`] is an in-memory curses engine with the same
//!   contract, for tests and headless rendering.
//!
//! ## Features
//!
//! - **ncurses**: link against the system ncurses library and enable the
//!   [`ffi`] module. Off by default, so the crate builds without it.
//!
//! ## Tracing
//!
//! Set `CURSES_TRACE` to a [`trace`] level (e.g. `0x20` for
//! [`trace::TRACE_CALLS`]) and optionally `CURSES_TRACE_FILE` to log every
//! call made through the binding.
//!
//! ## Example
//!
//! ```rust
//! use curses::emulator::Emulator;
//! use curses::*;
//!
//! fn main() -> Result<()> {
//!     let curses = Curses::new(Emulator::new(24, 80));
//!     let stdwin = curses.initscr()?;
//!
//!     curses.start_color()?;
//!     curses.init_pair(1, COLOR_RED, COLOR_BLACK);
//!
//!     stdwin.keypad(true)?;
//!     stdwin.attron(A_BOLD)?;
//!     stdwin.addstr(0, 0, "Hello, curses!", curses.color_pair(1));
//!     stdwin.attroff(A_BOLD)?;
//!     stdwin.refresh()?;
//!
//!     curses.native().push_key(KEY_ENTER);
//!     assert_eq!(stdwin.getch(), KEY_ENTER);
//!     curses.endwin()
//! }
//! ```

#![allow(clippy::needless_doctest_main)]
#![warn(missing_docs)]

pub mod attr;
pub mod color;
pub mod emulator;
pub mod error;
pub mod key;
pub mod native;
pub mod screen;
pub mod trace;
pub mod types;
pub mod window;

#[cfg(feature = "ncurses")]
pub mod ffi;

// Re-export commonly used items at crate root
pub use attr::*;
pub use color::*;
pub use error::{CursesError, NativeFailure, Result};
pub use key::*;
pub use native::{Native, RawWindow};
pub use screen::Curses;
pub use types::*;
pub use window::Window;

#[cfg(feature = "ncurses")]
pub use ffi::Ncurses;

/// The crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
