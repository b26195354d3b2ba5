pub mod config;
pub mod error;
pub mod git;
pub mod publish;

pub use config::{Config, PublishConfig};
pub use error::PublishError;
pub use git::{GitCli, VersionControl};
pub use publish::{ensure_repository, publish_changes, run_publish_workflow, PublishReport};
