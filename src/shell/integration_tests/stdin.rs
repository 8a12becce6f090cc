use crate::shell::error::ShellError;
use crate::shell::session::ShellSession;

use super::helper::{wait_for_exit, wait_until};

#[test]
fn feeds_input_to_the_child() {
    #[cfg(unix)]
    let mut session = ShellSession::spawn("cat").unwrap();
    #[cfg(windows)]
    let mut session = ShellSession::spawn("findstr .*").unwrap();

    session.write("hello\n").unwrap();

    let mut collected = Vec::new();
    wait_until("input echoed back", || {
        collected.extend(session.drain_output());
        collected.ends_with(b"hello\n") || collected.ends_with(b"hello\r\n")
    });

    session.close_stdin();
    wait_for_exit(&mut session);
    assert_eq!(session.exit_code(), 0);
}

#[test]
fn interactive_child_exits_on_request() {
    #[cfg(unix)]
    let mut session = ShellSession::spawn("read line; exit $line").unwrap();
    #[cfg(windows)]
    let mut session = ShellSession::spawn("set /p line= & exit 5").unwrap();

    assert!(!session.has_exited());

    session.write("5\n").unwrap();
    wait_for_exit(&mut session);
    assert_eq!(session.exit_code(), 5);
}

#[test]
fn write_to_exited_child_fails() {
    let mut session = ShellSession::spawn("echo done").unwrap();
    wait_for_exit(&mut session);

    let result = session.write("late\n");
    assert!(matches!(result, Err(ShellError::Write(_))));
}

#[test]
fn write_after_close_stdin_fails() {
    #[cfg(unix)]
    let mut session = ShellSession::spawn("cat").unwrap();
    #[cfg(windows)]
    let mut session = ShellSession::spawn("findstr .*").unwrap();

    session.close_stdin();

    let result = session.write("late\n");
    assert!(matches!(result, Err(ShellError::Write(_))));

    wait_for_exit(&mut session);
}
