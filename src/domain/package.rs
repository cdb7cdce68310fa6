use serde::Serialize;
use std::path::PathBuf;

/// Snapshot of the package being released
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: String,
    pub path: PathBuf,
    pub manifest_path: PathBuf,
    pub is_monorepo: bool,
}

/// Result of version resolution: the version to write and the tag to create
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVersion {
    pub version: String,
    pub tag: String,
}
