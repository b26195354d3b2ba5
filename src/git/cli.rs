use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use colored::Colorize;
use tracing::debug;

use super::{CommandOutput, VersionControl};
use crate::error::PublishError;

/// Runs the system `git` binary against a working directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
    workdir: PathBuf,
}

impl GitCli {
    /// Locate `git` on PATH and bind it to `workdir`
    pub fn locate(workdir: impl Into<PathBuf>) -> Result<Self, which::Error> {
        let program = which::which("git")?;
        Ok(Self::with_program(program, workdir))
    }

    pub fn with_program(program: impl Into<PathBuf>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            workdir: workdir.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<CommandOutput, PublishError> {
        let command = render_command(args);
        println!("{} {}", "$".dimmed(), command);
        debug!(%command, workdir = %self.workdir.display(), "spawning git");

        let output = Command::new(&self.program)
            .arg("-C")
            .arg(&self.workdir)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| PublishError::Spawn {
                command: command.clone(),
                source,
            })?;

        let result = CommandOutput::from_process(command, output);
        debug!(command = %result.command, status = ?result.status, "git exited");
        Ok(result)
    }
}

impl VersionControl for GitCli {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn is_inside_work_tree(&self) -> Result<CommandOutput, PublishError> {
        self.run(&["rev-parse", "--is-inside-work-tree"])
    }

    fn stage_paths(&self, paths: &[String]) -> Result<CommandOutput, PublishError> {
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run(&args)
    }

    fn stage_all(&self) -> Result<CommandOutput, PublishError> {
        self.run(&["add", "-A"])
    }

    fn staged_files(&self) -> Result<CommandOutput, PublishError> {
        self.run(&["diff", "--cached", "--name-only"])
    }

    fn commit(&self, message: &str) -> Result<CommandOutput, PublishError> {
        self.run(&["commit", "-m", message])
    }

    fn remote_url(&self, remote: &str) -> Result<CommandOutput, PublishError> {
        self.run(&["remote", "get-url", remote])
    }

    fn add_remote(&self, remote: &str, url: &str) -> Result<CommandOutput, PublishError> {
        self.run(&["remote", "add", remote, url])
    }

    fn push(&self, remote: &str, branch: &str) -> Result<CommandOutput, PublishError> {
        self.run(&["push", remote, branch])
    }
}

/// Render `git` plus its arguments for echoing, double-quoting any argument
/// a POSIX shell would not take literally
pub fn render_command(args: &[&str]) -> String {
    let mut line = String::from("git");
    for arg in args {
        line.push(' ');
        if arg.is_empty() || arg.chars().any(needs_quoting) {
            line.push('"');
            for c in arg.chars() {
                if matches!(c, '"' | '\\' | '$' | '`') {
                    line.push('\\');
                }
                line.push(c);
            }
            line.push('"');
        } else {
            line.push_str(arg);
        }
    }
    line
}

fn needs_quoting(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '"' | '\'' | '\\' | '$' | '`' | '&' | '|' | ';' | '<' | '>' | '(' | ')' | '*' | '?' | '!' | '#' | '~'
        )
}
