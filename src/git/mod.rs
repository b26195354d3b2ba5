mod cli;
mod output;

pub use cli::{render_command, GitCli};
pub use output::CommandOutput;

use std::path::Path;

use crate::error::PublishError;

/// The version-control operations the publish workflow relies on.
///
/// Each call runs one external command to completion and hands back its
/// status and output. An `Err` means the command could not be started at all;
/// a non-zero status is reported through [`CommandOutput`], not as an error.
pub trait VersionControl {
    /// Directory the commands run against
    fn workdir(&self) -> &Path;

    /// Is the working directory inside a repository?
    fn is_inside_work_tree(&self) -> Result<CommandOutput, PublishError>;

    fn stage_paths(&self, paths: &[String]) -> Result<CommandOutput, PublishError>;

    fn stage_all(&self) -> Result<CommandOutput, PublishError>;

    /// Names of staged files, one per line
    fn staged_files(&self) -> Result<CommandOutput, PublishError>;

    fn commit(&self, message: &str) -> Result<CommandOutput, PublishError>;

    /// URL of `remote`, non-zero status when it is not configured
    fn remote_url(&self, remote: &str) -> Result<CommandOutput, PublishError>;

    fn add_remote(&self, remote: &str, url: &str) -> Result<CommandOutput, PublishError>;

    fn push(&self, remote: &str, branch: &str) -> Result<CommandOutput, PublishError>;
}
