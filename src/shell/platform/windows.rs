use std::io::{self, Read};
use std::os::windows::io::AsRawHandle;
use std::os::windows::process::CommandExt;
use std::process::{Child, Command, Stdio};

use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::Pipes::PeekNamedPipe;
use windows::Win32::System::Threading::{
    CREATE_NO_WINDOW, OpenProcess, PROCESS_TERMINATE, TerminateProcess,
};

use super::ReadOutcome;

/// Spawn `command` through `cmd /C` with all three stdio streams piped.
///
/// The command line reaches the interpreter verbatim (no argument quoting),
/// and no console window is created for the child.
pub(crate) fn spawn_shell(command: &str) -> io::Result<Child> {
    let mut cmd = Command::new("cmd");
    cmd.raw_arg("/C")
        .raw_arg(command)
        .creation_flags(CREATE_NO_WINDOW.0)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd.spawn()
}

/// Reads never block on this platform (availability is peeked first), so
/// the retained end needs no flag changes.
pub(crate) fn prepare_pipe<H: AsRawHandle>(_pipe: &H) -> io::Result<()> {
    Ok(())
}

/// One bounded read attempt, gated on `PeekNamedPipe` so it cannot block.
pub(crate) fn read_pipe<P: Read + AsRawHandle + ?Sized>(
    pipe: &mut P,
    buf: &mut [u8],
) -> ReadOutcome {
    let mut available = 0u32;
    let peeked = unsafe {
        PeekNamedPipe(
            HANDLE(pipe.as_raw_handle()),
            None,
            0,
            None,
            Some(&mut available),
            None,
        )
    };
    if peeked.is_err() {
        // The write side is gone; treat like end of stream.
        return ReadOutcome::Closed;
    }
    if available == 0 {
        return ReadOutcome::WouldBlock;
    }

    match pipe.read(buf) {
        Ok(0) => ReadOutcome::Closed,
        Ok(read) => ReadOutcome::Data(read),
        Err(_) => ReadOutcome::Closed,
    }
}

/// Best-effort `TerminateProcess` on the child, reporting exit code 1.
pub(crate) fn terminate(pid: u32) -> io::Result<()> {
    unsafe {
        let process = OpenProcess(PROCESS_TERMINATE, false, pid).map_err(|e| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("failed to open process {pid}: {e}"),
            )
        })?;

        let result = TerminateProcess(process, 1)
            .map_err(|e| io::Error::other(format!("failed to terminate process {pid}: {e}")));

        let _ = CloseHandle(process);
        result
    }
}
