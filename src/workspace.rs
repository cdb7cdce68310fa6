//! Package discovery for `package.json` repositories
//!
//! Reads the root manifest and expands its `workspaces` globs into
//! sub-packages. Both the array form (`"workspaces": ["packages/*"]`) and the
//! object form (`"workspaces": { "packages": [...] }`) are understood;
//! patterns starting with `!` exclude matches.

use crate::domain::PackageDescriptor;
use crate::error::{Result, VersionManagerError};
use glob::{glob, Pattern};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Manifest file name
pub const MANIFEST: &str = "package.json";

#[derive(Debug, Deserialize)]
struct PackageJson {
    name: Option<String>,
    version: Option<String>,
    workspaces: Option<Workspaces>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Workspaces {
    Patterns(Vec<String>),
    Config {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl Workspaces {
    fn patterns(&self) -> &[String] {
        match self {
            Workspaces::Patterns(patterns) => patterns,
            Workspaces::Config { packages } => packages,
        }
    }
}

/// The root package and every workspace sub-package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub root: PackageDescriptor,
    pub packages: Vec<PackageDescriptor>,
}

impl Workspace {
    /// Discover the packages under `root`
    pub fn discover(root: &Path) -> Result<Self> {
        let manifest_path = root.join(MANIFEST);
        if !manifest_path.is_file() {
            return Err(VersionManagerError::manifest(format!(
                "{} not found in root ({})",
                MANIFEST,
                root.display()
            )));
        }

        let manifest = read_manifest(&manifest_path)?;
        let patterns = manifest
            .workspaces
            .as_ref()
            .map(|w| w.patterns().to_vec())
            .unwrap_or_default();

        let mut packages = Vec::new();
        for dir in resolve_package_dirs(root, &patterns)? {
            let sub_manifest_path = dir.join(MANIFEST);
            let sub_manifest = read_manifest(&sub_manifest_path)?;
            let name = sub_manifest.name.ok_or_else(|| {
                VersionManagerError::manifest(format!(
                    "{} has no \"name\" field",
                    sub_manifest_path.display()
                ))
            })?;

            packages.push(PackageDescriptor {
                name,
                version: sub_manifest.version.unwrap_or_default(),
                path: dir,
                manifest_path: sub_manifest_path,
                is_monorepo: true,
            });
        }

        let root_name = manifest.name.unwrap_or_else(|| {
            root.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        });

        let root_pkg = PackageDescriptor {
            name: root_name,
            version: manifest.version.unwrap_or_default(),
            path: root.to_path_buf(),
            manifest_path,
            is_monorepo: !packages.is_empty(),
        };

        debug!(
            root = %root_pkg.name,
            packages = packages.len(),
            "discovered workspace"
        );

        Ok(Workspace {
            root: root_pkg,
            packages,
        })
    }

    /// A repository is a monorepo when it has at least one sub-package
    pub fn is_monorepo(&self) -> bool {
        !self.packages.is_empty()
    }

    /// Look up a sub-package by its manifest name
    pub fn find(&self, name: &str) -> Result<&PackageDescriptor> {
        self.packages
            .iter()
            .find(|pkg| pkg.name == name)
            .ok_or_else(|| VersionManagerError::PackageNotFound(name.to_string()))
    }

    /// Names of every sub-package, in discovery order
    pub fn package_names(&self) -> Vec<String> {
        self.packages.iter().map(|pkg| pkg.name.clone()).collect()
    }
}

fn read_manifest(path: &Path) -> Result<PackageJson> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        VersionManagerError::manifest(format!("Cannot parse {}: {}", path.display(), e))
    })
}

/// Expand workspace globs into sorted, unique package directories.
///
/// Only directories holding a `package.json` are kept. The root itself and
/// anything inside `node_modules` are skipped.
fn resolve_package_dirs(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut exclusions = Vec::new();
    for pattern in patterns.iter().filter_map(|p| p.strip_prefix('!')) {
        exclusions.push(Pattern::new(normalize_pattern(pattern))?);
    }

    let escaped_root = Pattern::escape(&root.to_string_lossy());
    let mut dirs = BTreeSet::new();
    for pattern in patterns.iter().filter(|p| !p.starts_with('!')) {
        let full = format!("{}/{}", escaped_root, normalize_pattern(pattern));
        for entry in glob(&full)? {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("Error reading path: {}", e);
                    continue;
                }
            };

            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            if relative.as_os_str().is_empty()
                || relative
                    .components()
                    .any(|c| c == Component::Normal("node_modules".as_ref()))
                || exclusions.iter().any(|ex| ex.matches_path(relative))
            {
                continue;
            }

            if path.join(MANIFEST).is_file() {
                dirs.insert(path);
            }
        }
    }

    Ok(dirs.into_iter().collect())
}

/// Drop a leading `./` and trailing slashes so patterns compare against
/// root-relative paths
fn normalize_pattern(pattern: &str) -> &str {
    let mut pattern = pattern;
    while let Some(rest) = pattern.strip_prefix("./") {
        pattern = rest;
    }
    pattern.trim_end_matches('/')
}
