use crate::error::{Result, VersionManagerError};
use crate::git::tags_from_refs;
use git2::{
    Commit, Cred, CredentialType, Direction, ErrorCode, IndexAddOption, ObjectType, PushOptions,
    RemoteCallbacks, Repository as Git2Repo, Status, StatusOptions,
};
use std::cell::Cell;
use std::path::Path;
use tracing::debug;

/// Credential attempts before giving up on a remote
const MAX_CREDENTIAL_ATTEMPTS: usize = 3;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    fn find_remote(&self, name: &str) -> Result<git2::Remote<'_>> {
        self.repo
            .find_remote(name)
            .map_err(|e| VersionManagerError::remote(format!("Cannot find remote '{}': {}", name, e)))
    }

    fn push_refspec(&self, remote_name: &str, refspec: &str) -> Result<()> {
        let mut remote = self.find_remote(remote_name)?;

        let mut callbacks = remote_callbacks();
        callbacks.push_update_reference(|reference, status| match status {
            Some(message) => Err(git2::Error::from_str(&format!(
                "{} rejected: {}",
                reference, message
            ))),
            None => Ok(()),
        });

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(callbacks);

        debug!(remote = remote_name, refspec, "pushing");
        remote
            .push(&[refspec], Some(&mut push_options))
            .map_err(|e| VersionManagerError::remote(format!("Push failed: {}", e)))?;

        Ok(())
    }
}

/// Remote callbacks with SSH key, SSH agent and credential-helper support
fn remote_callbacks<'a>() -> RemoteCallbacks<'a> {
    let attempts = Cell::new(0usize);
    let mut callbacks = RemoteCallbacks::new();

    callbacks.credentials(move |url, username_from_url, allowed_types| {
        attempts.set(attempts.get() + 1);
        if attempts.get() > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::from_str("authentication failed"));
        }

        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(CredentialType::SSH_KEY) {
            if attempts.get() == 1 {
                if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
            }

            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }
        }

        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
            if let Ok(config) = git2::Config::open_default() {
                if let Ok(cred) = Cred::credential_helper(&config, url, username_from_url) {
                    return Ok(cred);
                }
            }
        }

        Cred::default()
    });

    callbacks
}

impl super::Repository for Git2Repository {
    fn has_uncommitted_changes(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;

        Ok(statuses.iter().any(|entry| {
            let status = entry.status();
            !status.is_empty() && !status.contains(Status::IGNORED)
        }))
    }

    fn current_branch(&self) -> Result<String> {
        match self.repo.head() {
            Ok(head) => {
                if !head.is_branch() {
                    return Err(VersionManagerError::branch(
                        "HEAD is detached; pass --branch to choose the release channel",
                    ));
                }
                head.shorthand()
                    .map(str::to_string)
                    .ok_or_else(|| VersionManagerError::branch("Branch name is not valid UTF-8"))
            }
            // A fresh repository has no commits yet but HEAD still names a branch
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head = self.repo.find_reference("HEAD")?;
                head.symbolic_target()
                    .and_then(|target| target.strip_prefix("refs/heads/"))
                    .map(str::to_string)
                    .ok_or_else(|| VersionManagerError::branch("Cannot resolve unborn HEAD"))
            }
            Err(e) => Err(VersionManagerError::branch(format!(
                "Cannot resolve HEAD: {}",
                e
            ))),
        }
    }

    fn local_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn remote_tags(&self, remote: &str) -> Result<Vec<String>> {
        let mut remote_handle = self.find_remote(remote)?;

        let connection = remote_handle
            .connect_auth(Direction::Fetch, Some(remote_callbacks()), None)
            .map_err(|e| {
                VersionManagerError::remote(format!("Cannot connect to '{}': {}", remote, e))
            })?;

        let heads = connection.list()?;
        let tags = tags_from_refs(heads.iter().map(|head| head.name()));
        debug!(remote, count = tags.len(), "listed remote tags");

        Ok(tags)
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        self.repo
            .tag_delete(name)
            .map_err(|e| VersionManagerError::tag(format!("Cannot delete tag '{}': {}", name, e)))
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let target = self
            .repo
            .head()?
            .peel(ObjectType::Commit)
            .map_err(|e| VersionManagerError::tag(format!("Cannot find HEAD commit: {}", e)))?;

        self.repo
            .tag_lightweight(name, &target, false)
            .map_err(|e| VersionManagerError::tag(format!("Cannot create tag: {}", e)))?;

        Ok(())
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_all(["*"], IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"], None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;

        let parent = match self.repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == ErrorCode::UnbornBranch => None,
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&Commit> = parent.iter().collect();

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;
        debug!(%oid, message, "created commit");

        Ok(())
    }

    fn push_branch(&self, remote: &str) -> Result<()> {
        let branch = self.current_branch()?;
        let refspec = format!("refs/heads/{}:refs/heads/{}", branch, branch);
        self.push_refspec(remote, &refspec)
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        let refspec = format!("refs/tags/{}:refs/tags/{}", tag, tag);
        self.push_refspec(remote, &refspec)
    }
}
