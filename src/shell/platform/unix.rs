use std::io::{self, Read};
use std::os::fd::AsFd;
use std::process::{Child, Command, Stdio};

use nix::fcntl::{FcntlArg, OFlag, fcntl};
use nix::sys::signal::{Signal, kill};
use nix::unistd::Pid;

use super::ReadOutcome;

/// Spawn `command` through `/bin/sh -c` with all three stdio streams piped.
///
/// The command string reaches the interpreter verbatim. An exec failure in
/// the forked child is reported back here as the spawn error; the child
/// never returns into caller code.
pub(crate) fn spawn_shell(command: &str) -> io::Result<Child> {
    Command::new("/bin/sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
}

/// Switch a retained pipe end to non-blocking reads.
pub(crate) fn prepare_pipe<F: AsFd>(pipe: &F) -> io::Result<()> {
    let fd = pipe.as_fd();
    let flags = fcntl(fd, FcntlArg::F_GETFL).map_err(to_io)?;
    let flags = OFlag::from_bits_retain(flags) | OFlag::O_NONBLOCK;
    fcntl(fd, FcntlArg::F_SETFL(flags)).map_err(to_io)?;
    Ok(())
}

/// One bounded read attempt against a non-blocking pipe end.
pub(crate) fn read_pipe<P: Read + ?Sized>(pipe: &mut P, buf: &mut [u8]) -> ReadOutcome {
    match pipe.read(buf) {
        Ok(0) => ReadOutcome::Closed,
        Ok(read) => ReadOutcome::Data(read),
        Err(e) if e.kind() == io::ErrorKind::WouldBlock => ReadOutcome::WouldBlock,
        Err(e) if e.kind() == io::ErrorKind::Interrupted => ReadOutcome::WouldBlock,
        Err(_) => ReadOutcome::Closed,
    }
}

/// Best-effort SIGTERM delivery to the child.
pub(crate) fn terminate(pid: u32) -> io::Result<()> {
    let pid = pid as i32;
    // Guard against signalling a whole process group with pid 0 or -1.
    if pid <= 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid pid: {pid}"),
        ));
    }

    kill(Pid::from_raw(pid), Signal::SIGTERM).map_err(to_io)
}

fn to_io(err: nix::errno::Errno) -> io::Error {
    io::Error::from_raw_os_error(err as i32)
}
