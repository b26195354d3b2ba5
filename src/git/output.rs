use std::process::Output;

/// Result of one external git invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit status, `None` when the process was killed by a signal
    pub status: Option<i32>,
    /// stdout followed by stderr
    pub output: String,
    /// The command line as it was echoed, e.g. `git push origin main`
    pub command: String,
}

impl CommandOutput {
    pub fn new(command: impl Into<String>, status: Option<i32>, output: impl Into<String>) -> Self {
        Self {
            status,
            output: output.into(),
            command: command.into(),
        }
    }

    pub fn from_process(command: String, output: Output) -> Self {
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&stderr);
        }

        Self {
            status: output.status.code(),
            output: text,
            command,
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Output with surrounding whitespace removed
    pub fn trimmed(&self) -> &str {
        self.output.trim()
    }

    /// Non-empty output lines, trimmed
    pub fn lines(&self) -> Vec<&str> {
        self.output
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }
}
