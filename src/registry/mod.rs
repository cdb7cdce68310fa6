//! Package registry and manifest collaborator
//!
//! The [PackageManager] trait covers the two things version-manager needs
//! from the package tooling: which versions are already published, and
//! writing a new version into a package manifest.
//!
//! - [npm::NpmCli]: shells out to the `npm` executable
//! - [mock::MockPackageManager]: a recording implementation for testing

pub mod mock;
pub mod npm;

pub use mock::MockPackageManager;
pub use npm::NpmCli;

use crate::error::Result;
use std::path::Path;

/// Registry queries and manifest writes
///
/// Implementations must be `Send + Sync` so the registry query can run on a
/// worker thread while remote tags are listed.
pub trait PackageManager: Send + Sync {
    /// All versions of `name` published on the registry.
    ///
    /// The query runs from `project_dir` so project registry settings and
    /// credentials apply. Any failure is reported as
    /// [crate::error::VersionManagerError::Registry].
    fn published_versions(&self, name: &str, project_dir: &Path) -> Result<Vec<String>>;

    /// Set the version in the manifest found in `package_dir`.
    ///
    /// Must not create a VCS commit or tag as a side effect.
    fn write_version(&self, package_dir: &Path, version: &str) -> Result<()>;
}
