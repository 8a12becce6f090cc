//! # shell-session
//!
//! A Rust library for running shell commands as child processes while
//! their output is captured in the background.
//!
//! A [`ShellSession`](shell::session::ShellSession) spawns one command
//! through the platform interpreter (`/bin/sh -c` on unix, `cmd /C` on
//! Windows), keeps private pipes to its stdin, stdout, and stderr, and runs
//! one reader thread per output stream. The readers accumulate bytes into
//! lock-guarded buffers that the caller empties on demand, so the child can
//! keep producing output without ever blocking the caller.
//!
//! ## Features
//!
//! - **Background Capture**: stdout and stderr are drained continuously and
//!   handed back in arrival order, exactly once
//! - **Stdin Support**: Send input to the running process at any time
//! - **Exit Tracking**: Non-blocking liveness polls with a latched exit code
//! - **Forced Termination**: Best-effort kill that always settles the state
//!
//! ## Quick Start
//!
//! ```rust
//! use shell_session::shell::session::ShellSession;
//! use std::time::Duration;
//!
//! fn main() -> Result<(), shell_session::shell::error::ShellError> {
//!     let mut session = ShellSession::spawn("echo hello")?;
//!
//!     while !session.has_exited() {
//!         std::thread::sleep(Duration::from_millis(10));
//!     }
//!
//!     let output = session.drain_output();
//!     println!("{}", String::from_utf8_lossy(&output));
//!     assert_eq!(session.exit_code(), 0);
//!     Ok(())
//! }
//! ```
//!
//! ## Interactive Processes
//!
//! ```rust
//! use shell_session::shell::session::ShellSession;
//! use std::time::Duration;
//!
//! fn main() -> Result<(), shell_session::shell::error::ShellError> {
//!     #[cfg(unix)]
//!     let mut session = ShellSession::spawn("read line; echo got $line")?;
//!     #[cfg(windows)]
//!     let mut session = ShellSession::spawn("set /p line= & echo got")?;
//!
//!     session.write("ping\n")?;
//!     while !session.has_exited() {
//!         std::thread::sleep(Duration::from_millis(10));
//!     }
//!     assert_eq!(session.exit_code(), 0);
//!     Ok(())
//! }
//! ```
//!
//! Commands reach the interpreter verbatim: there is no quoting, escaping,
//! or validation layer, and the output buffers grow without bound until
//! drained.
//!
//! ## Optional Features
//!
//! - `serde`: Enable serialization support for the public state type
//! - `tracing`: Enable structured logging integration

pub mod shell;
