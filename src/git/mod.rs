//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations
//! version-manager needs, so the resolution and reconciliation logic can be
//! exercised against an in-memory fake.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A recording implementation for testing
//!
//! Code that mutates repository state should depend on the [Repository]
//! trait and receive the implementation from its caller.

pub mod mock;
pub mod repository;

pub use mock::{Call, CallLog, MockRepository};
pub use repository::Git2Repository;

use crate::error::Result;

/// Git operations used by the bump-version workflow
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// `git2::Error` and remote failures to [crate::error::VersionManagerError].
pub trait Repository {
    /// Whether the working tree has staged, modified or untracked changes.
    ///
    /// Ignored files do not count.
    fn has_uncommitted_changes(&self) -> Result<bool>;

    /// Short name of the checked-out branch (e.g. "develop")
    fn current_branch(&self) -> Result<String>;

    /// Names of all tags in the local repository
    fn local_tags(&self) -> Result<Vec<String>>;

    /// Names of all tags advertised by a remote
    ///
    /// Peeled entries (`refs/tags/v1.0.0^{}`) are folded into their tag name.
    fn remote_tags(&self, remote: &str) -> Result<Vec<String>>;

    /// Delete a local tag
    fn delete_tag(&self, name: &str) -> Result<()>;

    /// Create a lightweight tag at HEAD
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Stage every change in the working tree and commit it on HEAD
    fn commit_all(&self, message: &str) -> Result<()>;

    /// Push the checked-out branch to a remote
    fn push_branch(&self, remote: &str) -> Result<()>;

    /// Push a single tag to a remote
    fn push_tag(&self, remote: &str, tag: &str) -> Result<()>;
}

/// Extract tag names from remote ref names.
///
/// Keeps only `refs/tags/*`, strips the peeled `^{}` suffix and removes
/// duplicates while preserving order.
///
/// # Example
/// ```
/// use version_manager::git::tags_from_refs;
///
/// let refs = ["HEAD", "refs/heads/main", "refs/tags/v1.0.0", "refs/tags/v1.0.0^{}"];
/// assert_eq!(tags_from_refs(refs), vec!["v1.0.0".to_string()]);
/// ```
pub fn tags_from_refs<'a>(refs: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    for reference in refs {
        let Some(name) = reference.trim().strip_prefix("refs/tags/") else {
            continue;
        };
        let name = name.strip_suffix("^{}").unwrap_or(name);
        if !name.is_empty() && !tags.iter().any(|tag| tag == name) {
            tags.push(name.to_string());
        }
    }

    tags
}
