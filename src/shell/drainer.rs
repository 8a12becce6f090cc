use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::shell::buffer::StreamBuffer;
use crate::shell::platform::{self, Pipe, ReadOutcome};

/// How long a drainer sleeps when its pipe has nothing pending.
pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Bounded size of a single pipe read.
pub(crate) const READ_CHUNK: usize = 4096;

/// Spawn the background loop that moves bytes from one pipe end into its
/// buffer.
///
/// The loop holds the pipe lock only for the read itself and appends under
/// the buffer lock. While data keeps coming it retries immediately so a
/// burst is drained in full; an empty pipe is re-checked every
/// [`POLL_INTERVAL`]. The loop exits once the stop signal is set, the
/// stream reports end of input, or the pipe fails hard (the latter is
/// absorbed silently, it usually just means the child went away).
pub(crate) fn spawn_stream_drainer<P: Pipe>(
    label: &'static str,
    pipe: Arc<Mutex<P>>,
    buffer: StreamBuffer,
    stop: Arc<AtomicBool>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("shell-{label}-drainer"))
        .spawn(move || {
            let mut chunk = [0u8; READ_CHUNK];
            while !stop.load(Ordering::Relaxed) {
                let outcome = {
                    let mut pipe = pipe.lock().unwrap_or_else(PoisonError::into_inner);
                    platform::read_pipe(&mut *pipe, &mut chunk)
                };
                match outcome {
                    ReadOutcome::Data(read) => buffer.append(&chunk[..read]),
                    ReadOutcome::WouldBlock => thread::sleep(POLL_INTERVAL),
                    ReadOutcome::Closed => break,
                }
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(stream = label, "drainer finished");
        })
}
