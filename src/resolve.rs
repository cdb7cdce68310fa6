//! Next-version resolution
//!
//! Given a package, a release selection and the set of versions and tags
//! already in use, find the first candidate version that is neither
//! published nor tagged on the remote. A previous failed release may have
//! left a published version or a dangling remote tag behind, so collisions
//! skip forward instead of failing.

use crate::domain::template::{
    self, MONOREPO_TEMPLATE, PACKAGE_NAME, PACKAGE_VERSION, STANDALONE_TEMPLATE,
};
use crate::domain::version::increment;
use crate::domain::{PackageDescriptor, ReleaseSelection, ResolvedVersion};
use crate::error::{Result, VersionManagerError};
use crate::git::Repository;
use crate::registry::PackageManager;
use std::collections::HashSet;
use std::path::Path;
use std::thread;
use tracing::{debug, info, warn};

/// Versions and tags already in use, fetched once per invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagUniverse {
    pub published_versions: HashSet<String>,
    pub remote_tags: HashSet<String>,
    pub local_tags: HashSet<String>,
}

impl TagUniverse {
    /// Build a universe from plain lists
    pub fn new<P, R, L>(published_versions: P, remote_tags: R, local_tags: L) -> Self
    where
        P: IntoIterator<Item = String>,
        R: IntoIterator<Item = String>,
        L: IntoIterator<Item = String>,
    {
        TagUniverse {
            published_versions: published_versions.into_iter().collect(),
            remote_tags: remote_tags.into_iter().collect(),
            local_tags: local_tags.into_iter().collect(),
        }
    }

    /// Fetch published versions, remote tags and local tags.
    ///
    /// The registry query runs on a scoped worker thread while the remote is
    /// listed on the calling thread; both complete before this returns.
    pub fn fetch(
        repo: &dyn Repository,
        package_manager: &dyn PackageManager,
        package_name: &str,
        project_dir: &Path,
        remote: &str,
    ) -> Result<Self> {
        let (published, remote_tags) = thread::scope(|scope| {
            let registry =
                scope.spawn(|| package_manager.published_versions(package_name, project_dir));
            let remote_tags = repo.remote_tags(remote);
            let published = registry
                .join()
                .unwrap_or_else(|_| Err(VersionManagerError::Registry));
            (published, remote_tags)
        });

        let universe = TagUniverse::new(published?, remote_tags?, repo.local_tags()?);
        debug!(
            published = universe.published_versions.len(),
            remote_tags = universe.remote_tags.len(),
            local_tags = universe.local_tags.len(),
            "fetched tag universe"
        );

        Ok(universe)
    }
}

/// Tag template to use for a package: the caller's when given and non-empty,
/// otherwise the monorepo or standalone default
pub fn tag_template<'a>(pkg: &PackageDescriptor, custom: Option<&'a str>) -> &'a str {
    match custom.filter(|t| !t.is_empty()) {
        Some(template) => template,
        None if pkg.is_monorepo => MONOREPO_TEMPLATE,
        None => STANDALONE_TEMPLATE,
    }
}

/// Render the tag for a version of a package
pub fn render_tag(template: &str, pkg: &PackageDescriptor, version: &str) -> String {
    template::render(
        template,
        &[
            (PACKAGE_NAME, Some(pkg.name.as_str())),
            (PACKAGE_VERSION, Some(version)),
        ],
    )
}

/// Compute the next free version and its tag.
///
/// Each candidate is incremented from the previous candidate, not from the
/// original version. A candidate is accepted when its version is not
/// published and its tag is not on the remote. At most
/// `published + remote + 1` candidates are examined; candidates strictly
/// increase, so each collision uses up a distinct entry.
///
/// # Errors
/// [VersionManagerError::VersionCalculation] when any increment fails,
/// which only happens for a malformed starting version or identifier.
pub fn resolve_next_version(
    pkg: &PackageDescriptor,
    selection: &ReleaseSelection,
    template: Option<&str>,
    universe: &TagUniverse,
) -> Result<ResolvedVersion> {
    let template = tag_template(pkg, template);
    let limit = universe.published_versions.len() + universe.remote_tags.len() + 1;
    let preid = selection.preid.as_deref();

    let unknown = template::unresolved_placeholders(&render_tag(template, pkg, "0.0.0"));
    if !unknown.is_empty() {
        warn!(template, ?unknown, "tag template has placeholders that will not be filled");
    }

    let mut candidate = pkg.version.clone();
    for _ in 0..limit {
        candidate = increment(&candidate, selection.release_type, preid).ok_or_else(|| {
            VersionManagerError::version_calculation(candidate.as_str(), selection.release_type)
        })?;
        let tag = render_tag(template, pkg, &candidate);

        let published = universe.published_versions.contains(&candidate);
        let tagged = universe.remote_tags.contains(&tag);
        if !published && !tagged {
            info!(package = %pkg.name, version = %candidate, %tag, "resolved next version");
            return Ok(ResolvedVersion {
                version: candidate,
                tag,
            });
        }

        debug!(version = %candidate, %tag, published, tagged, "candidate already used");
    }

    Err(VersionManagerError::version_calculation(
        pkg.version.as_str(),
        selection.release_type,
    ))
}
