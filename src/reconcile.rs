//! Applying a resolved version to the working tree and repository

use crate::domain::{PackageDescriptor, ResolvedVersion};
use crate::error::Result;
use crate::git::Repository;
use crate::registry::PackageManager;
use std::collections::HashSet;
use tracing::info;

/// What to do after the manifest has been written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Stage everything, commit and tag
    pub commit: bool,
    /// Push the branch and the tag; only honoured together with `commit`
    pub push: bool,
    /// Remote to push to
    pub remote: String,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        ApplyOptions {
            commit: true,
            push: false,
            remote: "origin".to_string(),
        }
    }
}

/// Write, commit, tag and push a resolved version.
///
/// Steps run strictly in order and the first failure aborts:
/// 1. delete a local tag with the same name, if one exists
/// 2. write the version into the package manifest (no VCS tag)
/// 3. when committing: stage all, commit with the tag as message, tag HEAD
/// 4. when committing and pushing: push the branch, then the tag
pub fn apply_version(
    resolved: &ResolvedVersion,
    pkg: &PackageDescriptor,
    local_tags: &HashSet<String>,
    options: &ApplyOptions,
    repo: &dyn Repository,
    package_manager: &dyn PackageManager,
) -> Result<()> {
    if local_tags.contains(&resolved.tag) {
        info!(tag = %resolved.tag, "removing stale local tag");
        repo.delete_tag(&resolved.tag)?;
    }

    package_manager.write_version(&pkg.path, &resolved.version)?;

    if !options.commit {
        return Ok(());
    }

    repo.commit_all(&resolved.tag)?;
    repo.create_tag(&resolved.tag)?;
    info!(tag = %resolved.tag, "created release commit and tag");

    if options.push {
        repo.push_branch(&options.remote)?;
        repo.push_tag(&options.remote, &resolved.tag)?;
        info!(tag = %resolved.tag, remote = %options.remote, "pushed branch and tag");
    }

    Ok(())
}
