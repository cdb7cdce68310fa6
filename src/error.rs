use thiserror::Error;

/// Unified error type for version-manager operations
#[derive(Error, Debug)]
pub enum VersionManagerError {
    #[error("There are uncommitted changes in the repository. Please commit or stash them before proceeding.")]
    UncommittedChanges,

    #[error("Failed to fetch the published versions. This may be because the package does not exist on the registry, the .npmrc is not configured, or another unknown issue occurred.")]
    Registry,

    #[error("New version could not be calculated from '{version}' ({release_type})")]
    VersionCalculation {
        version: String,
        release_type: String,
    },

    #[error("package.json not found for project {0}")]
    PackageNotFound(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Branch error: {0}")]
    Branch(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),
}

/// Convenience type alias for Results in version-manager
pub type Result<T> = std::result::Result<T, VersionManagerError>;

impl VersionManagerError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionManagerError::Config(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        VersionManagerError::Manifest(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        VersionManagerError::Tag(msg.into())
    }

    /// Create a branch error with context
    pub fn branch(msg: impl Into<String>) -> Self {
        VersionManagerError::Branch(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        VersionManagerError::Remote(msg.into())
    }

    /// Create a command error with context
    pub fn command(msg: impl Into<String>) -> Self {
        VersionManagerError::Command(msg.into())
    }

    /// Create a prompt error with context
    pub fn prompt(msg: impl Into<String>) -> Self {
        VersionManagerError::Prompt(msg.into())
    }

    /// Version computation failure for the given starting point
    pub fn version_calculation(version: impl Into<String>, release_type: impl ToString) -> Self {
        VersionManagerError::VersionCalculation {
            version: version.into(),
            release_type: release_type.to_string(),
        }
    }
}
