use crate::shell::session::ShellSession;

use super::helper::wait_for_exit;

#[test]
fn stderr_is_captured_separately() {
    #[cfg(unix)]
    let mut session = ShellSession::spawn("echo oops 1>&2; exit 2").unwrap();
    #[cfg(windows)]
    let mut session = ShellSession::spawn("echo oops 1>&2 & exit 2").unwrap();

    wait_for_exit(&mut session);

    let error = session.drain_error();
    assert!(String::from_utf8_lossy(&error).contains("oops"));
    assert!(session.drain_output().is_empty());
    assert_eq!(session.exit_code(), 2);
}

#[test]
fn interleaved_streams_do_not_cross() {
    #[cfg(unix)]
    let mut session =
        ShellSession::spawn("for i in 1 2 3; do echo out$i; echo err$i 1>&2; done").unwrap();
    #[cfg(windows)]
    let mut session = ShellSession::spawn(
        "(echo out1 & echo err1 1>&2 & echo out2 & echo err2 1>&2 & echo out3 & echo err3 1>&2)",
    )
    .unwrap();

    wait_for_exit(&mut session);

    let stdout = String::from_utf8(session.drain_output()).unwrap();
    let stderr = String::from_utf8(session.drain_error()).unwrap();

    let out_lines: Vec<&str> = stdout.lines().map(str::trim_end).collect();
    let err_lines: Vec<&str> = stderr.lines().map(str::trim_end).collect();
    assert_eq!(out_lines, ["out1", "out2", "out3"]);
    assert_eq!(err_lines, ["err1", "err2", "err3"]);
}
