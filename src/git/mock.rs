use crate::error::{Result, VersionManagerError};
use crate::git::Repository;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

/// A side effect observed by one of the recording fakes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    DeleteTag(String),
    CreateTag(String),
    Commit(String),
    PushBranch(String),
    PushTag { remote: String, tag: String },
    PublishedVersions { name: String, dir: PathBuf },
    WriteVersion { path: PathBuf, version: String },
}

/// Ordered journal of calls, shareable between several fakes so tests can
/// assert on ordering across collaborators
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: Call) {
        self.lock().push(call);
    }

    /// Snapshot of every call recorded so far
    pub fn calls(&self) -> Vec<Call> {
        self.lock().clone()
    }

    /// Index of the first call matching `predicate`
    pub fn position(&self, predicate: impl Fn(&Call) -> bool) -> Option<usize> {
        self.lock().iter().position(predicate)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Call>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// In-memory repository for testing without actual git operations
pub struct MockRepository {
    branch: String,
    dirty: bool,
    local_tags: Mutex<Vec<String>>,
    remote_tags: Vec<String>,
    failing: Option<&'static str>,
    log: CallLog,
}

impl MockRepository {
    /// Create a clean repository on `main` with no tags
    pub fn new() -> Self {
        Self::with_log(CallLog::new())
    }

    /// Create a repository that records into an existing journal
    pub fn with_log(log: CallLog) -> Self {
        MockRepository {
            branch: "main".to_string(),
            dirty: false,
            local_tags: Mutex::new(Vec::new()),
            remote_tags: Vec::new(),
            failing: None,
            log,
        }
    }

    pub fn set_branch(&mut self, branch: impl Into<String>) {
        self.branch = branch.into();
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    pub fn add_local_tag(&mut self, name: impl Into<String>) {
        self.tags().push(name.into());
    }

    pub fn add_remote_tag(&mut self, name: impl Into<String>) {
        self.remote_tags.push(name.into());
    }

    /// Make the named operation (e.g. "push_branch") fail
    pub fn fail_on(&mut self, operation: &'static str) {
        self.failing = Some(operation);
    }

    pub fn log(&self) -> &CallLog {
        &self.log
    }

    fn tags(&self) -> MutexGuard<'_, Vec<String>> {
        self.local_tags
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check(&self, operation: &str) -> Result<()> {
        if self.failing == Some(operation) {
            return Err(VersionManagerError::remote(format!(
                "simulated failure in {}",
                operation
            )));
        }
        Ok(())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn has_uncommitted_changes(&self) -> Result<bool> {
        self.check("has_uncommitted_changes")?;
        Ok(self.dirty)
    }

    fn current_branch(&self) -> Result<String> {
        self.check("current_branch")?;
        Ok(self.branch.clone())
    }

    fn local_tags(&self) -> Result<Vec<String>> {
        self.check("local_tags")?;
        Ok(self.tags().clone())
    }

    fn remote_tags(&self, _remote: &str) -> Result<Vec<String>> {
        self.check("remote_tags")?;
        Ok(self.remote_tags.clone())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        self.check("delete_tag")?;
        let mut tags = self.tags();
        let before = tags.len();
        tags.retain(|tag| tag != name);
        if tags.len() == before {
            return Err(VersionManagerError::tag(format!("tag '{}' not found", name)));
        }
        drop(tags);
        self.log.record(Call::DeleteTag(name.to_string()));
        Ok(())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.check("create_tag")?;
        let mut tags = self.tags();
        if tags.iter().any(|tag| tag == name) {
            return Err(VersionManagerError::tag(format!(
                "tag '{}' already exists",
                name
            )));
        }
        tags.push(name.to_string());
        drop(tags);
        self.log.record(Call::CreateTag(name.to_string()));
        Ok(())
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        self.check("commit_all")?;
        self.log.record(Call::Commit(message.to_string()));
        Ok(())
    }

    fn push_branch(&self, remote: &str) -> Result<()> {
        self.check("push_branch")?;
        self.log.record(Call::PushBranch(remote.to_string()));
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.check("push_tag")?;
        self.log.record(Call::PushTag {
            remote: remote.to_string(),
            tag: tag.to_string(),
        });
        Ok(())
    }
}
