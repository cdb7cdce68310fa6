use crate::error::{Result, VersionManagerError};
use crate::registry::PackageManager;
use serde::Deserialize;
use std::path::Path;
use std::process::{Command, Output};
use tracing::{debug, info};

/// Output of `npm view <name> versions --json`
///
/// npm prints a bare string instead of an array when exactly one version
/// exists.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ViewVersions {
    Many(Vec<String>),
    One(String),
}

/// Parse the JSON printed by `npm view <name> versions --json`
pub fn parse_versions(stdout: &str) -> Result<Vec<String>> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }

    let versions = match serde_json::from_str::<ViewVersions>(stdout)? {
        ViewVersions::Many(versions) => versions,
        ViewVersions::One(version) => vec![version],
    };

    Ok(versions)
}

/// Package manager backed by the `npm` command-line client
#[derive(Debug, Clone)]
pub struct NpmCli {
    program: String,
}

impl NpmCli {
    /// Use the `npm` found on `PATH`
    pub fn new() -> Self {
        Self::with_program("npm")
    }

    /// Use a specific npm-compatible executable
    pub fn with_program(program: impl Into<String>) -> Self {
        NpmCli {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str], dir: Option<&Path>) -> std::io::Result<Output> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }
        debug!(program = %self.program, ?args, ?dir, "running package manager");
        cmd.output()
    }
}

impl Default for NpmCli {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageManager for NpmCli {
    fn published_versions(&self, name: &str, project_dir: &Path) -> Result<Vec<String>> {
        let output = self
            .run(&["view", name, "versions", "--json"], Some(project_dir))
            .map_err(|e| {
                debug!(error = %e, "failed to start {}", self.program);
                VersionManagerError::Registry
            })?;

        if !output.status.success() {
            debug!(
                code = output.status.code().unwrap_or(-1),
                stderr = %String::from_utf8_lossy(&output.stderr),
                "registry query failed"
            );
            return Err(VersionManagerError::Registry);
        }

        let versions = parse_versions(&String::from_utf8_lossy(&output.stdout)).map_err(|e| {
            debug!(error = %e, "unreadable registry response");
            VersionManagerError::Registry
        })?;
        info!(package = name, count = versions.len(), "fetched published versions");

        Ok(versions)
    }

    fn write_version(&self, package_dir: &Path, version: &str) -> Result<()> {
        let output = self
            .run(
                &["version", version, "--no-git-tag-version"],
                Some(package_dir),
            )
            .map_err(|e| {
                VersionManagerError::command(format!("Failed to execute {}: {}", self.program, e))
            })?;

        if !output.status.success() {
            return Err(VersionManagerError::command(format!(
                "{} version {} failed with exit code {}\nStderr: {}",
                self.program,
                version,
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        info!(path = %package_dir.display(), version, "wrote manifest version");
        Ok(())
    }
}
