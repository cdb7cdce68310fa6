use crate::domain::release::ReleaseType;
use semver::{BuildMetadata, Prerelease, Version};

/// Parse a version string, accepting one leading `v` like npm's strict parser
pub fn parse(version: &str) -> Option<Version> {
    let trimmed = version.trim();
    let clean = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(clean).ok()
}

/// Compute the next version for a release type.
///
/// Follows npm semver increment rules:
/// - **major / minor / patch**: a pre-release of the target version is
///   promoted to that version instead of bumping again
///   (`1.1.0-beta.0` minor -> `1.1.0`)
/// - **premajor / preminor / prepatch**: always bump, then start a new
///   pre-release at `<preid>.0`, or `0` when there is no identifier
///
/// Build metadata is dropped. Returns `None` when the input is not a valid
/// version, the identifier is not a valid pre-release identifier, or a
/// component would overflow.
///
/// # Example
/// ```
/// use version_manager::domain::release::ReleaseType;
/// use version_manager::domain::version::increment;
///
/// assert_eq!(increment("1.0.0", ReleaseType::Patch, None).as_deref(), Some("1.0.1"));
/// assert_eq!(
///     increment("1.0.0", ReleaseType::Premajor, Some("beta")).as_deref(),
///     Some("2.0.0-beta.0")
/// );
/// assert_eq!(increment("invalid", ReleaseType::Patch, None), None);
/// ```
pub fn increment(version: &str, release_type: ReleaseType, preid: Option<&str>) -> Option<String> {
    let mut next = parse(version)?;
    let has_prerelease = !next.pre.is_empty();
    next.build = BuildMetadata::EMPTY;

    match release_type {
        ReleaseType::Major => {
            if next.minor != 0 || next.patch != 0 || !has_prerelease {
                next.major = next.major.checked_add(1)?;
            }
            next.minor = 0;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        ReleaseType::Minor => {
            if next.patch != 0 || !has_prerelease {
                next.minor = next.minor.checked_add(1)?;
            }
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        ReleaseType::Patch => {
            if !has_prerelease {
                next.patch = next.patch.checked_add(1)?;
            }
            next.pre = Prerelease::EMPTY;
        }
        ReleaseType::Premajor => {
            next.major = next.major.checked_add(1)?;
            next.minor = 0;
            next.patch = 0;
            next.pre = first_prerelease(preid)?;
        }
        ReleaseType::Preminor => {
            next.minor = next.minor.checked_add(1)?;
            next.patch = 0;
            next.pre = first_prerelease(preid)?;
        }
        ReleaseType::Prepatch => {
            next.patch = next.patch.checked_add(1)?;
            next.pre = first_prerelease(preid)?;
        }
    }

    Some(next.to_string())
}

fn first_prerelease(preid: Option<&str>) -> Option<Prerelease> {
    let text = match preid.filter(|id| !id.is_empty()) {
        Some(id) => format!("{}.0", id),
        None => "0".to_string(),
    };
    Prerelease::new(&text).ok()
}
