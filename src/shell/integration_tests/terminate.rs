use crate::shell::session::ShellSession;
use crate::shell::state::ShellState;

use super::helper::{wait_for_exit, wait_until};

#[test]
fn force_terminate_latches_forced_state() {
    #[cfg(unix)]
    let mut session = ShellSession::spawn("sleep 30").unwrap();
    #[cfg(windows)]
    let mut session = ShellSession::spawn("ping -n 31 127.0.0.1 >nul").unwrap();

    session.force_terminate();

    assert!(session.has_exited());
    assert_eq!(session.exit_code(), 1);
    assert_eq!(session.state(), ShellState::Forced);
}

#[test]
fn force_terminate_is_latched_even_when_repeated() {
    #[cfg(unix)]
    let mut session = ShellSession::spawn("sleep 30").unwrap();
    #[cfg(windows)]
    let mut session = ShellSession::spawn("ping -n 31 127.0.0.1 >nul").unwrap();

    session.force_terminate();
    // The second request hits a child that is already on its way out; the
    // state stays latched either way.
    session.force_terminate();

    assert!(session.has_exited());
    assert_eq!(session.exit_code(), 1);
}

#[test]
fn force_terminate_overrides_a_natural_exit() {
    let mut session = ShellSession::spawn("echo done").unwrap();
    wait_for_exit(&mut session);
    assert_eq!(session.exit_code(), 0);

    session.force_terminate();

    assert!(session.has_exited());
    assert_eq!(session.exit_code(), 1);
    assert_eq!(session.state(), ShellState::Forced);
}

#[test]
fn output_before_termination_is_kept() {
    #[cfg(unix)]
    let mut session = ShellSession::spawn("echo early; sleep 30").unwrap();
    #[cfg(windows)]
    let mut session = ShellSession::spawn("echo early & ping -n 31 127.0.0.1 >nul").unwrap();

    let mut collected = Vec::new();
    wait_until("early output", || {
        collected.extend(session.drain_output());
        !collected.is_empty()
    });

    session.force_terminate();
    assert!(String::from_utf8_lossy(&collected).contains("early"));
}

#[cfg(unix)]
#[test]
fn signal_death_reports_exit_code_one() {
    let mut session = ShellSession::spawn("kill -9 $$").unwrap();
    wait_for_exit(&mut session);

    assert_eq!(session.exit_code(), 1);
    assert_eq!(session.state(), ShellState::Exited(1));
}
