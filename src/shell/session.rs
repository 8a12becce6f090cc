use std::io::{self, Write as _};
use std::process::{Child, ChildStderr, ChildStdin, ChildStdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use crate::shell::buffer::StreamBuffer;
use crate::shell::drainer::{READ_CHUNK, spawn_stream_drainer};
use crate::shell::error::ShellError;
use crate::shell::platform::{self, Pipe, ReadOutcome};
use crate::shell::state::ShellState;

/// A shell command running as a child process, with its output captured in
/// the background.
///
/// Construction spawns the child through the platform interpreter and starts
/// one reader thread per output stream; the readers accumulate bytes into
/// shared buffers that [`drain_output`](Self::drain_output) and
/// [`drain_error`](Self::drain_error) empty on demand. Dropping the session
/// stops the readers and releases every handle exactly once; the child
/// itself is left running unless [`force_terminate`](Self::force_terminate)
/// was called.
///
/// The session is the sole owner of the process identity and its three pipe
/// ends.
#[derive(Debug)]
pub struct ShellSession {
    child: Child,
    process_id: u32,
    state: ShellState,
    stdin: Option<ChildStdin>,
    stdout: Arc<Mutex<ChildStdout>>,
    stderr: Arc<Mutex<ChildStderr>>,
    output: StreamBuffer,
    error: StreamBuffer,
    stop: Arc<AtomicBool>,
    drainers: Vec<JoinHandle<()>>,
}

/// Everything acquired after the child itself exists.
struct Wired {
    stdin: ChildStdin,
    stdout: Arc<Mutex<ChildStdout>>,
    stderr: Arc<Mutex<ChildStderr>>,
    output: StreamBuffer,
    error: StreamBuffer,
    stop: Arc<AtomicBool>,
    drainers: Vec<JoinHandle<()>>,
}

impl ShellSession {
    /// Spawn `command` through the platform shell (`/bin/sh -c` on unix,
    /// `cmd /C` on Windows).
    ///
    /// The command string is handed to the interpreter verbatim; nothing is
    /// quoted, escaped, or validated here.
    ///
    /// # Errors
    ///
    /// [`ShellError::Spawn`] if the platform fails to create the child,
    /// [`ShellError::ResourceCreation`] if the pipes or reader threads
    /// cannot be set up afterwards. Both unwind completely: a child that was
    /// already created is killed and reaped before the error is returned.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(command = %command.as_ref())))]
    pub fn spawn(command: impl AsRef<str>) -> Result<Self, ShellError> {
        let mut child = platform::spawn_shell(command.as_ref()).map_err(ShellError::Spawn)?;
        let process_id = child.id();

        match Self::wire_streams(&mut child) {
            Ok(wired) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(process_id, "shell process spawned");

                Ok(ShellSession {
                    child,
                    process_id,
                    state: ShellState::Running,
                    stdin: Some(wired.stdin),
                    stdout: wired.stdout,
                    stderr: wired.stderr,
                    output: wired.output,
                    error: wired.error,
                    stop: wired.stop,
                    drainers: wired.drainers,
                })
            }
            Err(e) => {
                // The child exists but the session cannot be completed;
                // take it down before reporting the failure.
                let _ = child.kill();
                let _ = child.wait();
                Err(ShellError::ResourceCreation(e))
            }
        }
    }

    fn wire_streams(child: &mut Child) -> io::Result<Wired> {
        let (Some(stdin), Some(stdout), Some(stderr)) =
            (child.stdin.take(), child.stdout.take(), child.stderr.take())
        else {
            return Err(io::Error::other("child is missing a piped stream"));
        };

        platform::prepare_pipe(&stdout)?;
        platform::prepare_pipe(&stderr)?;

        let stdout = Arc::new(Mutex::new(stdout));
        let stderr = Arc::new(Mutex::new(stderr));
        let output = StreamBuffer::new();
        let error = StreamBuffer::new();
        let stop = Arc::new(AtomicBool::new(false));

        let stdout_drainer =
            spawn_stream_drainer("stdout", Arc::clone(&stdout), output.clone(), Arc::clone(&stop))?;
        let stderr_drainer =
            match spawn_stream_drainer("stderr", Arc::clone(&stderr), error.clone(), Arc::clone(&stop)) {
                Ok(handle) => handle,
                Err(e) => {
                    stop.store(true, Ordering::Relaxed);
                    let _ = stdout_drainer.join();
                    return Err(e);
                }
            };
        let drainers = vec![stdout_drainer, stderr_drainer];

        Ok(Wired {
            stdin,
            stdout,
            stderr,
            output,
            error,
            stop,
            drainers,
        })
    }

    /// All stdout bytes accumulated since the previous drain.
    ///
    /// Never waits for new data; returns an empty buffer when nothing has
    /// arrived. Bytes come back exactly once, in pipe order, unaltered (line
    /// endings included).
    pub fn drain_output(&self) -> Vec<u8> {
        self.output.take()
    }

    /// All stderr bytes accumulated since the previous drain.
    pub fn drain_error(&self) -> Vec<u8> {
        self.error.take()
    }

    /// Write `input` to the child's stdin pipe.
    ///
    /// Blocks only as long as the platform pipe write itself blocks; nothing
    /// is buffered or retried on this side.
    ///
    /// # Errors
    ///
    /// [`ShellError::Write`] when the pipe write fails, including writes to
    /// a child that already exited or after
    /// [`close_stdin`](Self::close_stdin).
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(bytes = input.as_ref().len())))]
    pub fn write(&mut self, input: impl AsRef<[u8]>) -> Result<(), ShellError> {
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(ShellError::Write(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "stdin already closed",
            )));
        };
        stdin.write_all(input.as_ref()).map_err(ShellError::Write)
    }

    /// Close the child's stdin pipe, signalling end of input.
    ///
    /// Children that read stdin to exhaustion need this to terminate.
    /// Subsequent [`write`](Self::write) calls fail.
    pub fn close_stdin(&mut self) {
        self.stdin.take();
    }

    /// Whether the child has been observed to terminate.
    ///
    /// Polls the OS without waiting. The first observation of an exit moves
    /// any bytes still sitting in the pipes into the buffers (so a later
    /// drain returns them) and latches the exit code; once latched the
    /// answer comes from the cached state without touching the OS again.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(process_id = self.process_id)))]
    pub fn has_exited(&mut self) -> bool {
        if self.state.is_terminal() {
            return true;
        }

        match self.child.try_wait() {
            Ok(Some(status)) => {
                // Abnormal death (signal, no real exit code) is reported as 1.
                let code = status.code().unwrap_or(1);
                self.capture_remaining();
                self.state = ShellState::Exited(code);

                #[cfg(feature = "tracing")]
                tracing::debug!(code, "shell process exited");
                true
            }
            Ok(None) => false,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, "failed to poll shell process status");
                false
            }
        }
    }

    /// Request platform termination of the child and latch the state to a
    /// forced exit with code 1.
    ///
    /// Best-effort: the latch happens whether or not the kill succeeds, and
    /// it overrides any exit observed earlier. A child that ignores the
    /// request may keep running even though the session reports it exited.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(process_id = self.process_id)))]
    pub fn force_terminate(&mut self) {
        if let Err(_e) = platform::terminate(self.process_id) {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, "failed to terminate shell process");
        }
        self.state = ShellState::Forced;
    }

    /// The latched exit code, or 0 while the child is still running.
    ///
    /// Polls for an exit first if none has been observed yet. The running
    /// sentinel carries no meaning; use [`state`](Self::state) to tell a
    /// real exit code of 0 apart from a still-running child.
    pub fn exit_code(&mut self) -> i32 {
        if !self.state.is_terminal() {
            self.has_exited();
        }
        self.state.code().unwrap_or(0)
    }

    /// The exit state as of the last poll; never queries the OS itself.
    pub fn state(&self) -> ShellState {
        self.state
    }

    /// Platform process identifier, stable for the session's lifetime.
    pub fn process_id(&self) -> u32 {
        self.process_id
    }

    /// Final synchronous pipe pass once an exit has been observed: whatever
    /// the child wrote before dying is moved into the buffers.
    fn capture_remaining(&self) {
        drain_pipe(&self.stdout, &self.output);
        drain_pipe(&self.stderr, &self.error);
    }
}

impl Drop for ShellSession {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        for drainer in self.drainers.drain(..) {
            let _ = drainer.join();
        }
        // Reap a child that already died; a live one is left to run.
        let _ = self.child.try_wait();
    }
}

fn drain_pipe<P: Pipe>(pipe: &Arc<Mutex<P>>, buffer: &StreamBuffer) {
    let mut pipe = pipe.lock().unwrap_or_else(PoisonError::into_inner);
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        match platform::read_pipe(&mut *pipe, &mut chunk) {
            ReadOutcome::Data(read) => buffer.append(&chunk[..read]),
            ReadOutcome::WouldBlock | ReadOutcome::Closed => break,
        }
    }
}
