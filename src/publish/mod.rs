mod report;

pub use report::{CommitOutcome, PublishReport, PushOutcome, RemoteOutcome};

use colored::Colorize;
use tracing::{debug, info};

use crate::config::PublishConfig;
use crate::error::PublishError;
use crate::git::{CommandOutput, VersionControl};

/// Stage, commit, make sure the remote exists, then push.
///
/// Every step runs to completion before the next one starts. The first
/// failing command ends the run and comes back as [`PublishError`]; turning
/// that into an exit status is left to the caller.
pub fn run_publish_workflow<V>(vcs: &V, config: &PublishConfig) -> Result<PublishReport, PublishError>
where
    V: VersionControl + ?Sized,
{
    ensure_repository(vcs)?;
    publish_changes(vcs, config)
}

/// Fails with [`PublishError::NotARepository`] unless the working directory
/// is inside a repository. Runs nothing else.
pub fn ensure_repository<V: VersionControl + ?Sized>(vcs: &V) -> Result<(), PublishError> {
    if !vcs.is_inside_work_tree()?.success() {
        return Err(PublishError::NotARepository {
            path: vcs.workdir().to_path_buf(),
        });
    }
    Ok(())
}

/// The steps after the repository check
pub fn publish_changes<V>(vcs: &V, config: &PublishConfig) -> Result<PublishReport, PublishError>
where
    V: VersionControl + ?Sized,
{
    stage(vcs, config)?;
    let commit = commit_staged(vcs, config)?;
    let remote = ensure_remote(vcs, config)?;
    let push = push_branch(vcs, config)?;

    info!(?commit, ?remote, ?push, "publish finished");
    Ok(PublishReport { commit, remote, push })
}

fn stage<V: VersionControl + ?Sized>(vcs: &V, config: &PublishConfig) -> Result<(), PublishError> {
    if config.stage_all {
        require_success(vcs.stage_all()?)?;
    } else {
        require_success(vcs.stage_paths(&config.files)?)?;
    }
    Ok(())
}

fn commit_staged<V: VersionControl + ?Sized>(
    vcs: &V,
    config: &PublishConfig,
) -> Result<CommitOutcome, PublishError> {
    let listing = require_success(vcs.staged_files()?)?;
    let staged: Vec<String> = listing.lines().into_iter().map(String::from).collect();

    if staged.is_empty() {
        println!("{} No staged changes to commit.", "→".yellow());
        return Ok(CommitOutcome::NothingStaged);
    }

    println!("{} Staged files:", "●".cyan());
    for file in &staged {
        println!("  {}", file);
    }

    if config.dry_run {
        println!("{} Dry-run: would commit with message:", "→".yellow());
        println!("  {}", config.message.dimmed());
        return Ok(CommitOutcome::DryRun(staged));
    }

    require_success(vcs.commit(&config.message)?)?;
    println!("{} Committed {} file(s)", "✓".green(), staged.len());
    Ok(CommitOutcome::Committed(staged))
}

fn ensure_remote<V: VersionControl + ?Sized>(
    vcs: &V,
    config: &PublishConfig,
) -> Result<RemoteOutcome, PublishError> {
    let existing = vcs.remote_url(&config.remote)?;
    if existing.success() {
        let url = existing.trimmed().to_string();
        println!("{} {} remote configured: {}", "✓".green(), config.remote, url.cyan());
        return Ok(RemoteOutcome::Existing(url));
    }
    debug!(remote = %config.remote, status = ?existing.status, "remote not configured");

    let url = config.origin.ssh_url();
    println!(
        "{} No {} remote found. Adding {} -> {}",
        "→".yellow(),
        config.remote,
        config.remote,
        url.cyan()
    );
    require_success(vcs.add_remote(&config.remote, &url)?)?;
    Ok(RemoteOutcome::Registered(url))
}

fn push_branch<V: VersionControl + ?Sized>(
    vcs: &V,
    config: &PublishConfig,
) -> Result<PushOutcome, PublishError> {
    if !config.push {
        println!("{} --no-push set: skipping push step.", "→".yellow());
        return Ok(PushOutcome::Disabled);
    }

    println!("{} Pushing to {} {}...", "●".cyan(), config.remote, config.branch);
    if config.dry_run {
        println!(
            "{} Dry-run: would run git push {} {}",
            "→".yellow(),
            config.remote,
            config.branch
        );
        return Ok(PushOutcome::DryRun);
    }

    require_success(vcs.push(&config.remote, &config.branch)?)?;
    println!("{} Pushed {} to {}", "✓".green(), config.branch, config.remote);
    Ok(PushOutcome::Pushed)
}

fn require_success(result: CommandOutput) -> Result<CommandOutput, PublishError> {
    if result.success() {
        Ok(result)
    } else {
        Err(PublishError::failed(result))
    }
}
