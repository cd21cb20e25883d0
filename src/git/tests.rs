// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use super::command::GitCommand;
use super::query::{BranchQuery, GixBackend};
use super::{MAINSTREAM, WorkTree, origin, validate_feature_name};
use crate::workflow::invocation::Message;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Runs shell git in `dir`, failing the test on a non-zero exit.
fn git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git is installed");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Initialize a repository on mainstream with one empty commit.
/// Uses shell git to avoid coupling tests to gix internals.
fn init_test_repo_with_commit(path: &Path) {
    git(path, &["init", "--quiet", "--initial-branch", MAINSTREAM]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test"]);
    git(path, &["commit", "--allow-empty", "-m", "Initial commit", "--quiet"]);
}

fn shell(command: &GitCommand) -> String {
    command.invocation("git", &WorkTree::local("/tmp/L")).to_shell()
}

// --- Feature names ---

#[test]
fn test_validate_feature_name_accepts_branch_like_names() {
    for name in ["noname", "fix-42", "team/parser", "v1.2_rc"] {
        assert!(validate_feature_name(name).is_ok(), "{name:?}");
    }
}

#[test]
fn test_validate_feature_name_rejections() {
    for name in [
        "", "mainstream", "-x", "with space", "a..b", "a//b", "dir/", "x.lock", "x.", "q?",
    ] {
        assert!(validate_feature_name(name).is_err(), "{name:?} must be rejected");
    }

    let err = validate_feature_name(MAINSTREAM).expect_err("reserved");
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid feature name 'mainstream': reserved for the mainstream branch"
    );
}

// --- Trees ---

#[test]
fn test_local_and_remote_tree_layout() {
    let local = WorkTree::local("/tmp/L");
    assert_eq!(local.git_dir(), Path::new("/tmp/L/.git"));
    assert_eq!(
        local.location_args(),
        ["--git-dir", "/tmp/L/.git", "--work-tree", "/tmp/L"]
    );

    let remote = WorkTree::remote("box", Path::new("/home/dev/.gru_remote/work"), "/srv/R");
    assert_eq!(remote.git_dir(), Path::new("/home/dev/.gru_remote/work/.git"));
    assert_eq!(remote.content_dir(), Path::new("/srv/R"));
    assert_eq!(remote.host(), Some("box"));
    assert_eq!(origin("noname"), "origin/noname");
}

// --- Command lowering ---

#[test]
fn test_git_command_lowering() {
    let lines = [
        GitCommand::Init,
        GitCommand::FetchAll,
        GitCommand::Checkout {
            target: "noname".to_string(),
        },
        GitCommand::SwitchTo {
            branch: "noname".to_string(),
            start: Some(origin(MAINSTREAM)),
            track: false,
        },
        GitCommand::SwitchTo {
            branch: "noname".to_string(),
            start: Some(origin("noname")),
            track: true,
        },
        GitCommand::AddAll,
        GitCommand::Commit {
            message: Message::literal("[local] 01.02.2026 10:00:00"),
            allow_empty: true,
        },
        GitCommand::PushUpstream {
            branch: "noname".to_string(),
        },
        GitCommand::Pull,
        GitCommand::Merge {
            target: origin(MAINSTREAM),
        },
        GitCommand::Clean,
        GitCommand::RestoreAll,
    ]
    .iter()
    .map(shell)
    .collect::<Vec<_>>()
    .join("\n");

    insta::assert_snapshot!(lines, @r#"
    git --git-dir /tmp/L/.git --work-tree /tmp/L init --initial-branch=mainstream
    git --git-dir /tmp/L/.git --work-tree /tmp/L fetch --all
    git --git-dir /tmp/L/.git --work-tree /tmp/L checkout noname
    git --git-dir /tmp/L/.git --work-tree /tmp/L checkout -B noname origin/mainstream
    git --git-dir /tmp/L/.git --work-tree /tmp/L checkout --track -B noname origin/noname
    git --git-dir /tmp/L/.git --work-tree /tmp/L add -A
    git --git-dir /tmp/L/.git --work-tree /tmp/L commit --allow-empty -m "[local] 01.02.2026 10:00:00"
    git --git-dir /tmp/L/.git --work-tree /tmp/L push --set-upstream origin noname
    git --git-dir /tmp/L/.git --work-tree /tmp/L pull --no-rebase --no-edit
    git --git-dir /tmp/L/.git --work-tree /tmp/L merge --no-ff --no-edit origin/mainstream
    git --git-dir /tmp/L/.git --work-tree /tmp/L clean -fd
    git --git-dir /tmp/L/.git --work-tree /tmp/L reset --hard
    "#);
}

#[test]
fn test_commands_with_own_path_skip_location() {
    let clone = GitCommand::Clone {
        url: "ssh://box/home/dev/.gru_remote/work/media".to_string(),
        dest: PathBuf::from("/tmp/L"),
    };
    let bare = GitCommand::InitBare {
        path: PathBuf::from("/home/dev/.gru_remote/work/media"),
    };

    assert!(!clone.uses_location());
    assert!(!bare.uses_location());
    assert_eq!(
        shell(&clone),
        "git clone 'ssh://box/home/dev/.gru_remote/work/media' /tmp/L"
    );
    assert_eq!(
        shell(&bare),
        "git init --bare --initial-branch=mainstream /home/dev/.gru_remote/work/media"
    );
}

// --- gix queries ---

#[test]
fn test_branch_queries_on_real_repository() {
    let temp = temp_dir();
    let repo = temp.path();
    init_test_repo_with_commit(repo);
    git(repo, &["branch", "fix-7"]);

    let query = GixBackend;
    assert!(query.has_local_branch(repo, "fix-7").unwrap());
    assert!(query.has_local_branch(repo, MAINSTREAM).unwrap());
    assert!(!query.has_local_branch(repo, "never-visited").unwrap());
    assert_eq!(query.local_branches(repo).unwrap(), ["fix-7", MAINSTREAM]);
    assert!(query.remote_branches(repo).unwrap().is_empty());
}

#[test]
fn test_uncommitted_changes_detection() {
    let temp = temp_dir();
    let repo = temp.path();
    init_test_repo_with_commit(repo);

    let query = GixBackend;
    assert!(!query.has_uncommitted_changes(repo).unwrap());

    std::fs::write(repo.join("x.txt"), "draft").unwrap();
    assert!(query.has_uncommitted_changes(repo).unwrap());
}

#[test]
fn test_remote_branches_after_clone() {
    let temp = temp_dir();
    let upstream = temp.path().join("upstream");
    std::fs::create_dir_all(&upstream).unwrap();
    init_test_repo_with_commit(&upstream);
    git(&upstream, &["branch", "noname"]);

    git(temp.path(), &["clone", "--quiet", "upstream", "clone"]);
    let clone = temp.path().join("clone");

    let query = GixBackend;
    assert_eq!(
        query.remote_branches(&clone).unwrap(),
        ["origin/mainstream", "origin/noname"]
    );
    assert_eq!(query.local_branches(&clone).unwrap(), [MAINSTREAM]);
}

#[test]
fn test_query_errors_name_the_repository() {
    let temp = temp_dir();
    let err = GixBackend
        .has_local_branch(temp.path(), "noname")
        .expect_err("not a repository");
    assert!(err.to_string().starts_with("git error: failed to query repository"));
}
