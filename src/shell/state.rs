/// Exit state of the child process, latched once terminal.
///
/// The state only ever moves `Running -> Exited` (the OS reported
/// termination) or `Running -> Forced` (termination was requested through
/// the session). Once latched it is never recomputed from the OS.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    /// The child has not been observed to terminate yet.
    Running,
    /// The child terminated on its own with the given exit code.
    Exited(i32),
    /// Termination was requested through the session; the reported code is 1
    /// whether or not the request actually stopped the child.
    Forced,
}

impl ShellState {
    /// Whether the state is terminal.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ShellState::Running)
    }

    /// The latched exit code, `None` while running.
    pub fn code(&self) -> Option<i32> {
        match self {
            ShellState::Running => None,
            ShellState::Exited(code) => Some(*code),
            ShellState::Forced => Some(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ShellState;

    #[test]
    fn terminal_states_and_codes() {
        assert!(!ShellState::Running.is_terminal());
        assert_eq!(ShellState::Running.code(), None);

        assert!(ShellState::Exited(7).is_terminal());
        assert_eq!(ShellState::Exited(7).code(), Some(7));
        assert_eq!(ShellState::Exited(0).code(), Some(0));

        assert!(ShellState::Forced.is_terminal());
        assert_eq!(ShellState::Forced.code(), Some(1));
    }
}
