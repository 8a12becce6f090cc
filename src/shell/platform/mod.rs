//! Platform process and pipe primitives.
//!
//! Exactly one implementation is selected per target at build time. The rest
//! of the crate is written against these signatures only: spawn through the
//! platform interpreter, one non-blocking read attempt per call, best-effort
//! termination by process id.

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub(crate) use unix::{prepare_pipe, read_pipe, spawn_shell, terminate};

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub(crate) use windows::{prepare_pipe, read_pipe, spawn_shell, terminate};

/// Outcome of one non-blocking pipe read attempt.
#[derive(Debug)]
pub(crate) enum ReadOutcome {
    /// This many bytes were read into the caller's buffer.
    Data(usize),
    /// The pipe is open but has nothing pending right now.
    WouldBlock,
    /// End of stream or a hard pipe error; no more data will arrive.
    Closed,
}

/// Bound required of a drainable pipe end on this platform.
#[cfg(unix)]
pub(crate) trait Pipe: std::io::Read + Send + 'static {}
#[cfg(unix)]
impl<T: std::io::Read + Send + 'static> Pipe for T {}

#[cfg(windows)]
pub(crate) trait Pipe: std::io::Read + std::os::windows::io::AsRawHandle + Send + 'static {}
#[cfg(windows)]
impl<T: std::io::Read + std::os::windows::io::AsRawHandle + Send + 'static> Pipe for T {}
