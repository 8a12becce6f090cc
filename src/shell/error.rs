use std::io;

use thiserror::Error;

/// Errors surfaced by a [`ShellSession`](crate::shell::session::ShellSession).
///
/// Construction failures (`ResourceCreation`, `Spawn`) are fatal to the
/// attempted session; no partially usable object is ever returned. `Write`
/// failures are per-call and leave the session usable.
#[derive(Debug, Error)]
pub enum ShellError {
    /// A pipe, handle, or reader thread could not be set up.
    #[error("failed to prepare process resources: {0}")]
    ResourceCreation(#[source] io::Error),

    /// The platform failed to create the child process.
    #[error("failed to spawn shell process: {0}")]
    Spawn(#[source] io::Error),

    /// A write to the child's stdin pipe failed.
    #[error("failed to write to process stdin: {0}")]
    Write(#[source] io::Error),
}

impl ShellError {
    /// Raw OS error code carried by the underlying I/O error, if any.
    pub fn os_error(&self) -> Option<i32> {
        match self {
            ShellError::ResourceCreation(e) | ShellError::Spawn(e) | ShellError::Write(e) => {
                e.raw_os_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::ShellError;

    #[test]
    fn os_error_code_is_exposed() {
        let err = ShellError::Spawn(io::Error::from_raw_os_error(2));
        assert_eq!(err.os_error(), Some(2));

        let err = ShellError::Write(io::Error::other("no code attached"));
        assert_eq!(err.os_error(), None);
    }

    #[test]
    fn display_names_the_failed_operation() {
        let err = ShellError::ResourceCreation(io::Error::other("boom"));
        assert!(err.to_string().contains("resources"));

        let err = ShellError::Spawn(io::Error::other("boom"));
        assert!(err.to_string().contains("spawn"));

        let err = ShellError::Write(io::Error::other("boom"));
        assert!(err.to_string().contains("stdin"));
    }
}
