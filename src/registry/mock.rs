use crate::error::{Result, VersionManagerError};
use crate::git::mock::{Call, CallLog};
use crate::registry::PackageManager;
use std::collections::HashMap;
use std::path::Path;

/// In-memory package manager for testing without a registry
pub struct MockPackageManager {
    published: HashMap<String, Vec<String>>,
    unreachable: bool,
    log: CallLog,
}

impl MockPackageManager {
    /// Create a registry where no package has been published
    pub fn new() -> Self {
        Self::with_log(CallLog::new())
    }

    /// Create a registry that records into an existing journal
    pub fn with_log(log: CallLog) -> Self {
        MockPackageManager {
            published: HashMap::new(),
            unreachable: false,
            log,
        }
    }

    /// Mark versions of a package as already published
    pub fn add_published(&mut self, name: impl Into<String>, versions: &[&str]) {
        self.published
            .entry(name.into())
            .or_default()
            .extend(versions.iter().map(|v| v.to_string()));
    }

    /// Make every registry query fail
    pub fn set_unreachable(&mut self, unreachable: bool) {
        self.unreachable = unreachable;
    }

    pub fn log(&self) -> &CallLog {
        &self.log
    }
}

impl Default for MockPackageManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageManager for MockPackageManager {
    fn published_versions(&self, name: &str, project_dir: &Path) -> Result<Vec<String>> {
        self.log.record(Call::PublishedVersions {
            name: name.to_string(),
            dir: project_dir.to_path_buf(),
        });
        if self.unreachable {
            return Err(VersionManagerError::Registry);
        }
        Ok(self.published.get(name).cloned().unwrap_or_default())
    }

    fn write_version(&self, package_dir: &Path, version: &str) -> Result<()> {
        self.log.record(Call::WriteVersion {
            path: package_dir.to_path_buf(),
            version: version.to_string(),
        });
        Ok(())
    }
}
