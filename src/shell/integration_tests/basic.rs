use crate::shell::session::ShellSession;
use crate::shell::state::ShellState;

use super::helper::{collect_output_until_exit, wait_for_exit};

#[test]
fn echo_round_trip() {
    let mut session = ShellSession::spawn("echo hi").unwrap();
    let output = collect_output_until_exit(&mut session);

    #[cfg(unix)]
    assert_eq!(output, b"hi\n");
    #[cfg(windows)]
    assert_eq!(output, b"hi\r\n");

    assert!(session.drain_error().is_empty());
    assert_eq!(session.exit_code(), 0);
    assert_eq!(session.state(), ShellState::Exited(0));
}

#[test]
fn exit_code_is_reported() {
    let mut session = ShellSession::spawn("exit 7").unwrap();
    wait_for_exit(&mut session);
    assert_eq!(session.exit_code(), 7);
    assert_eq!(session.state(), ShellState::Exited(7));
}

#[test]
fn drains_are_exhausted_after_exit() {
    let mut session = ShellSession::spawn("echo once").unwrap();
    wait_for_exit(&mut session);

    assert!(!session.drain_output().is_empty());
    assert!(session.drain_output().is_empty());
    assert!(session.drain_output().is_empty());
}

#[test]
fn exit_code_zero_while_running() {
    #[cfg(unix)]
    let mut session = ShellSession::spawn("sleep 2").unwrap();
    #[cfg(windows)]
    let mut session = ShellSession::spawn("ping -n 3 127.0.0.1 >nul").unwrap();

    assert!(!session.has_exited());
    assert_eq!(session.exit_code(), 0);
    assert_eq!(session.state(), ShellState::Running);

    session.force_terminate();
}

#[test]
fn process_id_is_stable() {
    let mut session = ShellSession::spawn("echo pid").unwrap();
    let pid = session.process_id();
    assert!(pid > 0);

    wait_for_exit(&mut session);
    assert_eq!(session.process_id(), pid);
}

#[test]
fn no_output_is_lost_under_drain_interleaving() {
    #[cfg(unix)]
    let mut session =
        ShellSession::spawn("i=0; while [ $i -lt 200 ]; do echo line$i; i=$((i+1)); done").unwrap();
    #[cfg(windows)]
    let mut session = ShellSession::spawn("for /L %i in (0,1,199) do @echo line%i").unwrap();

    let output = collect_output_until_exit(&mut session);
    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 200);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(line.trim_end(), format!("line{i}"));
    }
    assert_eq!(session.exit_code(), 0);
}

#[test]
fn drop_does_not_wait_for_child_exit() {
    #[cfg(unix)]
    let session = ShellSession::spawn("sleep 2").unwrap();
    #[cfg(windows)]
    let session = ShellSession::spawn("ping -n 3 127.0.0.1 >nul").unwrap();

    let started = std::time::Instant::now();
    drop(session);
    assert!(started.elapsed() < std::time::Duration::from_secs(1));
}
