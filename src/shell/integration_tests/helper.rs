use std::thread;
use std::time::{Duration, Instant};

use crate::shell::session::ShellSession;

pub(crate) const EXIT_DEADLINE: Duration = Duration::from_secs(10);

/// Poll `session` until it reports an exit, failing the test on deadline.
pub(crate) fn wait_for_exit(session: &mut ShellSession) {
    let deadline = Instant::now() + EXIT_DEADLINE;
    while !session.has_exited() {
        assert!(
            Instant::now() < deadline,
            "child did not exit within {EXIT_DEADLINE:?}"
        );
        thread::sleep(Duration::from_millis(10));
    }
}

/// Poll until `condition` holds, failing the test on deadline.
pub(crate) fn wait_until(what: &str, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + EXIT_DEADLINE;
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        thread::sleep(Duration::from_millis(10));
    }
}

/// Drain stdout continuously until the child exits, then once more to pick
/// up the final capture.
pub(crate) fn collect_output_until_exit(session: &mut ShellSession) -> Vec<u8> {
    let deadline = Instant::now() + EXIT_DEADLINE;
    let mut collected = Vec::new();
    while !session.has_exited() {
        assert!(
            Instant::now() < deadline,
            "child did not exit within {EXIT_DEADLINE:?}"
        );
        collected.extend(session.drain_output());
        thread::sleep(Duration::from_millis(5));
    }
    collected.extend(session.drain_output());
    collected
}
