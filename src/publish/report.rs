#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A commit was created from these staged files
    Committed(Vec<String>),
    /// Staging left nothing to commit
    NothingStaged,
    /// Files were staged but `--dry-run` skipped the commit
    DryRun(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// The remote already resolved to this URL
    Existing(String),
    /// The remote was missing and got registered with this URL
    Registered(String),
}

impl RemoteOutcome {
    pub fn url(&self) -> &str {
        match self {
            Self::Existing(url) | Self::Registered(url) => url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed,
    /// `--no-push`
    Disabled,
    DryRun,
}

/// What a successful publish run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub commit: CommitOutcome,
    pub remote: RemoteOutcome,
    pub push: PushOutcome,
}
