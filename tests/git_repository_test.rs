// tests/git_repository_test.rs
use std::fs;
use std::path::Path;

use git2::{Repository as Git2Repo, Signature};
use tempfile::TempDir;
use version_manager::git::{Git2Repository, Repository};

/// Initialise a repository on `main` with one commit
fn init_repo(dir: &Path) -> Git2Repo {
    let repo = Git2Repo::init(dir).unwrap();
    repo.set_head("refs/heads/main").unwrap();
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Release Bot").unwrap();
        config.set_str("user.email", "release@example.com").unwrap();
    }

    fs::write(dir.join("package.json"), r#"{"name": "root", "version": "1.0.0"}"#).unwrap();
    commit_everything(&repo, "initial");
    repo
}

fn commit_everything(repo: &Git2Repo, message: &str) {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let signature = Signature::now("Release Bot", "release@example.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .unwrap();
}

/// A bare repository registered as `origin`
fn add_bare_origin(repo: &Git2Repo, bare_dir: &Path) -> Git2Repo {
    let bare = Git2Repo::init_bare(bare_dir).unwrap();
    repo.remote("origin", bare_dir.to_str().unwrap()).unwrap();
    bare
}

#[test]
fn test_clean_tree_has_no_changes() {
    let dir = TempDir::new().unwrap();
    init_repo(dir.path());
    let repo = Git2Repository::open(dir.path()).unwrap();

    assert!(!repo.has_uncommitted_changes().unwrap());
}

#[test]
fn test_modified_and_untracked_files_count_as_changes() {
    let dir = TempDir::new().unwrap();
    init_repo(dir.path());
    let repo = Git2Repository::open(dir.path()).unwrap();

    fs::write(dir.path().join("notes.txt"), "draft").unwrap();
    assert!(repo.has_uncommitted_changes().unwrap());

    fs::remove_file(dir.path().join("notes.txt")).unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "root", "version": "1.0.1"}"#,
    )
    .unwrap();
    assert!(repo.has_uncommitted_changes().unwrap());
}

#[test]
fn test_ignored_files_do_not_count() {
    let dir = TempDir::new().unwrap();
    let git = init_repo(dir.path());
    fs::write(dir.path().join(".gitignore"), "node_modules/\n").unwrap();
    commit_everything(&git, "ignore deps");

    fs::create_dir_all(dir.path().join("node_modules/left-pad")).unwrap();
    fs::write(dir.path().join("node_modules/left-pad/index.js"), "").unwrap();

    let repo = Git2Repository::open(dir.path()).unwrap();
    assert!(!repo.has_uncommitted_changes().unwrap());
}

#[test]
fn test_current_branch() {
    let dir = TempDir::new().unwrap();
    let git = init_repo(dir.path());
    let repo = Git2Repository::open(dir.path()).unwrap();
    assert_eq!(repo.current_branch().unwrap(), "main");

    let head = git.head().unwrap().peel_to_commit().unwrap();
    git.branch("develop", &head, false).unwrap();
    git.set_head("refs/heads/develop").unwrap();
    assert_eq!(repo.current_branch().unwrap(), "develop");
}

#[test]
fn test_current_branch_on_unborn_head() {
    let dir = TempDir::new().unwrap();
    let git = Git2Repo::init(dir.path()).unwrap();
    git.set_head("refs/heads/uat").unwrap();

    let repo = Git2Repository::open(dir.path()).unwrap();
    assert_eq!(repo.current_branch().unwrap(), "uat");
}

#[test]
fn test_detached_head_is_an_error() {
    let dir = TempDir::new().unwrap();
    let git = init_repo(dir.path());
    let head = git.head().unwrap().target().unwrap();
    git.set_head_detached(head).unwrap();

    let repo = Git2Repository::open(dir.path()).unwrap();
    assert!(repo.current_branch().is_err());
}

#[test]
fn test_create_list_and_delete_tags() {
    let dir = TempDir::new().unwrap();
    init_repo(dir.path());
    let repo = Git2Repository::open(dir.path()).unwrap();

    repo.create_tag("v1.0.0").unwrap();
    repo.create_tag("pkg-a@1.0.0").unwrap();
    let mut tags = repo.local_tags().unwrap();
    tags.sort();
    assert_eq!(tags, vec!["pkg-a@1.0.0", "v1.0.0"]);

    assert!(repo.create_tag("v1.0.0").is_err());

    repo.delete_tag("v1.0.0").unwrap();
    assert_eq!(repo.local_tags().unwrap(), vec!["pkg-a@1.0.0"]);
    assert!(repo.delete_tag("v9.9.9").is_err());
}

#[test]
fn test_commit_all_stages_new_and_modified_files() {
    let dir = TempDir::new().unwrap();
    let git = init_repo(dir.path());
    let repo = Git2Repository::open(dir.path()).unwrap();

    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "root", "version": "1.0.1"}"#,
    )
    .unwrap();
    fs::write(dir.path().join("CHANGELOG.md"), "# 1.0.1\n").unwrap();

    repo.commit_all("v1.0.1").unwrap();

    assert!(!repo.has_uncommitted_changes().unwrap());
    let head = git.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message(), Some("v1.0.1"));
    assert_eq!(head.parent_count(), 1);
}

#[test]
fn test_commit_all_stages_deletions() {
    let dir = TempDir::new().unwrap();
    let git = init_repo(dir.path());
    fs::write(dir.path().join("obsolete.txt"), "old").unwrap();
    commit_everything(&git, "add obsolete");

    fs::remove_file(dir.path().join("obsolete.txt")).unwrap();
    let repo = Git2Repository::open(dir.path()).unwrap();
    repo.commit_all("cleanup").unwrap();

    assert!(!repo.has_uncommitted_changes().unwrap());
    let tree = git.head().unwrap().peel_to_tree().unwrap();
    assert!(tree.get_name("obsolete.txt").is_none());
}

#[test]
fn test_push_branch_and_tag_then_list_remote_tags() {
    let dir = TempDir::new().unwrap();
    let bare_dir = TempDir::new().unwrap();
    let git = init_repo(dir.path());
    let bare = add_bare_origin(&git, bare_dir.path());
    let repo = Git2Repository::open(dir.path()).unwrap();

    assert!(repo.remote_tags("origin").unwrap().is_empty());

    repo.create_tag("v1.0.0").unwrap();
    repo.push_branch("origin").unwrap();
    repo.push_tag("origin", "v1.0.0").unwrap();

    assert!(bare.find_reference("refs/heads/main").is_ok());
    assert!(bare.find_reference("refs/tags/v1.0.0").is_ok());
    assert_eq!(repo.remote_tags("origin").unwrap(), vec!["v1.0.0"]);
}

#[test]
fn test_empty_remote_has_no_tags() {
    let dir = TempDir::new().unwrap();
    let bare_dir = TempDir::new().unwrap();
    let git = init_repo(dir.path());
    add_bare_origin(&git, bare_dir.path());
    let repo = Git2Repository::open(dir.path()).unwrap();

    assert_eq!(repo.remote_tags("origin").unwrap(), Vec::<String>::new());

    // A remote holding only a tag advertises no HEAD
    repo.create_tag("v0.1.0").unwrap();
    repo.push_tag("origin", "v0.1.0").unwrap();
    assert_eq!(repo.remote_tags("origin").unwrap(), vec!["v0.1.0"]);
}

#[test]
fn test_unknown_remote_is_an_error() {
    let dir = TempDir::new().unwrap();
    init_repo(dir.path());
    let repo = Git2Repository::open(dir.path()).unwrap();

    assert!(repo.remote_tags("upstream").is_err());
    assert!(repo.push_branch("upstream").is_err());
}

#[test]
fn test_open_discovers_from_subdirectory() {
    let dir = TempDir::new().unwrap();
    init_repo(dir.path());
    let nested = dir.path().join("packages/pkg-a");
    fs::create_dir_all(&nested).unwrap();

    let repo = Git2Repository::open(&nested).unwrap();
    assert_eq!(repo.current_branch().unwrap(), "main");
}
