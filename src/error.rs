use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::git::CommandOutput;

/// Exit status when `git` cannot be started, as a shell reports it
pub const EXIT_SPAWN_FAILED: u8 = 127;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("{} is not inside a git repository. Initialize one or run from the repo root.", .path.display())]
    NotARepository { path: PathBuf },

    #[error("command failed: `{command}` ({})", describe_status(.status))]
    CommandFailed {
        command: String,
        status: Option<i32>,
        output: String,
    },

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
}

impl PublishError {
    pub fn failed(result: CommandOutput) -> Self {
        Self::CommandFailed {
            command: result.command,
            status: result.status,
            output: result.output,
        }
    }

    /// Process exit status this failure should end the run with
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotARepository { .. } => 1,
            Self::CommandFailed { status, .. } => status
                .and_then(|s| u8::try_from(s).ok())
                .filter(|&s| s != 0)
                .unwrap_or(1),
            Self::Spawn { .. } => EXIT_SPAWN_FAILED,
        }
    }

    /// Captured output of the failing command, if any
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { output, .. } if !output.trim().is_empty() => Some(output.trim()),
            _ => None,
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let not_repo = PublishError::NotARepository { path: PathBuf::from("/tmp/site") };
        assert_eq!(not_repo.exit_code(), 1);

        let push = PublishError::failed(CommandOutput::new("git push origin main", Some(128), "denied"));
        assert_eq!(push.exit_code(), 128);

        let killed = PublishError::failed(CommandOutput::new("git push origin main", None, ""));
        assert_eq!(killed.exit_code(), 1);

        let spawn = PublishError::Spawn {
            command: "git add -A".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "no git"),
        };
        assert_eq!(spawn.exit_code(), EXIT_SPAWN_FAILED);
    }

    #[test]
    fn test_display_and_output() {
        let err = PublishError::failed(CommandOutput::new(
            "git push origin main",
            Some(128),
            "Permission denied (publickey).\n",
        ));
        assert_eq!(
            err.to_string(),
            "command failed: `git push origin main` (exit status 128)"
        );
        assert_eq!(err.output(), Some("Permission denied (publickey)."));

        let quiet = PublishError::failed(CommandOutput::new("git add -A", Some(1), "  \n"));
        assert_eq!(quiet.output(), None);
    }
}
