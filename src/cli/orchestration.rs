//! Main workflow orchestration logic
//!
//! This module contains the bump-version workflow. It keeps CLI argument
//! parsing in `main.rs` separate from the business logic, and receives every
//! collaborator from its caller so it can run against fakes.

use std::path::PathBuf;

use tracing::{info, instrument};

use crate::config::Config;
use crate::domain::{
    BranchClassification, PackageDescriptor, ReleaseSelection, ReleaseType, ResolvedVersion,
};
use crate::error::{Result, VersionManagerError};
use crate::git::Repository;
use crate::reconcile::{apply_version, ApplyOptions};
use crate::registry::PackageManager;
use crate::resolve::{resolve_next_version, TagUniverse};
use crate::ui::Prompter;
use crate::workspace::Workspace;

/// Arguments for the bump-version workflow
///
/// Mirrors the CLI flags in a form that can be built without clap.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpVersionArgs {
    /// Repository root holding the root `package.json`
    pub root: PathBuf,

    /// Resolve only; do not write, commit, tag or push
    pub dry_run: bool,

    /// Commit and tag after writing the manifest
    pub commit: bool,

    /// Refuse to run with uncommitted changes
    pub git_check: bool,

    /// Push branch and tag after committing
    pub push: bool,

    /// Branch name to classify instead of the checked-out branch
    pub branch: Option<String>,

    /// Pre-release identifier overriding the channel default
    pub preid: Option<String>,

    /// Tag and commit-message template
    pub commit_msg_template: Option<String>,

    /// Release type; prompted for when absent
    pub release_type: Option<ReleaseType>,

    /// Workspace package to bump; prompted for when absent in a monorepo
    pub package: Option<String>,

    /// Remote overriding the configured one
    pub remote: Option<String>,
}

impl BumpVersionArgs {
    /// Defaults matching the CLI without flags
    pub fn new(root: impl Into<PathBuf>) -> Self {
        BumpVersionArgs {
            root: root.into(),
            dry_run: false,
            commit: true,
            git_check: true,
            push: false,
            branch: None,
            preid: None,
            commit_msg_template: None,
            release_type: None,
            package: None,
            remote: None,
        }
    }
}

/// Result of a successful bump-version run
#[derive(Debug, Clone, PartialEq)]
pub struct BumpOutcome {
    /// The package that was bumped
    pub package: PackageDescriptor,

    /// How the branch was classified
    pub branch: BranchClassification,

    /// The version and tag that were (or would be) applied
    pub resolved: ResolvedVersion,

    /// Remote used for tags and pushes
    pub remote: String,

    /// Nothing was changed
    pub dry_run: bool,

    /// A commit and tag were created
    pub committed: bool,

    /// Branch and tag were pushed
    pub pushed: bool,
}

/// Main bump-version workflow
///
/// Orchestrates the whole process:
/// 1. Guard against uncommitted changes
/// 2. Discover the workspace and pick the package
/// 3. Classify the branch and choose the release type and identifier
/// 4. Fetch published versions and tags, resolve the next version
/// 5. Apply it unless this is a dry run
#[instrument(skip_all, fields(root = %args.root.display()))]
pub fn run_bump_version(
    args: &BumpVersionArgs,
    config: &Config,
    repo: &dyn Repository,
    package_manager: &dyn PackageManager,
    prompter: &dyn Prompter,
) -> Result<BumpOutcome> {
    if args.git_check && repo.has_uncommitted_changes()? {
        return Err(VersionManagerError::UncommittedChanges);
    }

    let workspace = Workspace::discover(&args.root)?;
    let package = select_package(&workspace, args.package.as_deref(), prompter)?;

    let current_branch = match args.branch {
        Some(ref name) => name.clone(),
        None => repo.current_branch()?,
    };
    let branch = BranchClassification::classify(
        args.branch.as_deref(),
        &current_branch,
        &config.branches,
    );
    info!(branch = %branch.name, channel = %branch.channel, "classified branch");

    let release_type = match args.release_type {
        Some(release_type) => release_type,
        None => ReleaseType::for_change(prompter.select_change(&branch)?, &branch),
    };
    let selection = ReleaseSelection::new(
        release_type,
        &branch,
        &config.preids,
        args.preid.as_deref(),
    );
    info!(
        release_type = %selection.release_type,
        preid = selection.preid.as_deref().unwrap_or("-"),
        "release selected"
    );

    let remote = args.remote.clone().unwrap_or_else(|| config.remote.clone());
    let universe = TagUniverse::fetch(
        repo,
        package_manager,
        &package.name,
        &args.root,
        &remote,
    )?;

    let template = args
        .commit_msg_template
        .as_deref()
        .or(config.commit_msg_template.as_deref());
    let resolved = resolve_next_version(&package, &selection, template, &universe)?;

    if args.dry_run {
        info!(version = %resolved.version, tag = %resolved.tag, "dry run, nothing applied");
        return Ok(BumpOutcome {
            package,
            branch,
            resolved,
            remote,
            dry_run: true,
            committed: false,
            pushed: false,
        });
    }

    let options = ApplyOptions {
        commit: args.commit,
        push: args.push,
        remote: remote.clone(),
    };
    apply_version(
        &resolved,
        &package,
        &universe.local_tags,
        &options,
        repo,
        package_manager,
    )?;

    Ok(BumpOutcome {
        package,
        branch,
        resolved,
        remote,
        dry_run: false,
        committed: options.commit,
        pushed: options.commit && options.push,
    })
}

/// The package to bump: the root for a standalone repository, otherwise the
/// requested or prompted sub-package
fn select_package(
    workspace: &Workspace,
    requested: Option<&str>,
    prompter: &dyn Prompter,
) -> Result<PackageDescriptor> {
    if !workspace.is_monorepo() {
        return Ok(workspace.root.clone());
    }

    let name = match requested {
        Some(name) => name.to_string(),
        None => prompter.select_package(&workspace.package_names())?,
    };

    workspace.find(&name).cloned()
}
