// gru-rs: local/remote working copy synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use super::invocation::{Invocation, Message};
use super::remote::{RemoteExecutor, RemoteLayout, RemoteSession, SshExecutor};
use super::test_utils::RecordingRunner;
use super::{LocalSequencer, Operation, VersionControlClient, Workflow};
use crate::error::{GruError, SubsystemError};
use crate::git::WorkTree;

const LOCAL: &str = "git --git-dir /tmp/L/.git --work-tree /tmp/L";
const REMOTE: &str = "git --git-dir /home/dev/.gru_remote/work/.git --work-tree /srv/content";

fn layout() -> RemoteLayout {
    RemoteLayout {
        root_dir: ".gru_remote".to_string(),
        profile: "work".to_string(),
        path_prefix: "/usr/local/bin".to_string(),
        git: "git".to_string(),
    }
}

async fn open_session(runner: &Arc<RecordingRunner>, name: &str) -> RemoteSession {
    let executor: Arc<dyn RemoteExecutor> =
        Arc::new(SshExecutor::new(runner.clone(), "box", "ssh", "scp"));
    RemoteSession::open(executor, &layout(), Path::new("/srv/content"), name)
        .await
        .expect("home resolves")
}

// --- Messages and invocations ---

#[test]
fn test_message_rendering() {
    let message = Message::prefixed("[remote] ", Message::literal("SVN r").var("revision"));

    insta::assert_snapshot!(message.to_string(), @"[remote] SVN r${revision}");
    insta::assert_snapshot!(message.to_shell(), @r#""[remote] SVN r${revision}""#);
    assert_eq!(message.variables().collect::<Vec<_>>(), ["revision"]);

    let mut vars = BTreeMap::new();
    vars.insert("revision".to_string(), "1234".to_string());
    assert_eq!(message.resolve(&vars).expect("captured"), "[remote] SVN r1234");
}

#[test]
fn test_message_escapes_shell_specials() {
    let message = Message::literal(r#"say "hi" to $USER"#);
    insta::assert_snapshot!(message.to_shell(), @r#""say \"hi\" to \$USER""#);
}

#[test]
fn test_message_uncaptured_variable() {
    let message = Message::literal("SVN r").var("revision");
    let err = message
        .resolve(&BTreeMap::new())
        .expect_err("nothing captured");
    assert!(matches!(err, SubsystemError::UncapturedVariable(ref var) if var == "revision"));
}

#[test]
fn test_invocation_shell_quoting() {
    let invocation = Invocation::new("svn")
        .args(["update", "--non-interactive"])
        .arg("/srv/my content");
    insta::assert_snapshot!(invocation.to_shell(), @"svn update --non-interactive '/srv/my content'");

    let command = invocation.resolve(&BTreeMap::new()).expect("no variables");
    assert_eq!(command.to_string(), "svn update --non-interactive \"/srv/my content\"");
}

#[test]
fn test_operation_lowering_of_filesystem_steps() {
    let tree = WorkTree::local("/tmp/L");
    let shell = |operation: Operation| match operation.lower("git", &tree) {
        super::Step::Exec(invocation) => invocation.to_shell(),
        super::Step::Capture { .. } => panic!("not a capture"),
    };

    assert_eq!(shell(Operation::RemoveDir("/tmp/L".into())), "rm -rf /tmp/L");
    assert_eq!(shell(Operation::MakeDir("/tmp/L".into())), "mkdir -p /tmp/L");
    insta::assert_snapshot!(
        shell(Operation::AppendLine {
            path: "/r/.git/info/exclude".into(),
            line: ".svn".to_string(),
        }),
        @r#"sh -c 'printf '\''%s\n'\'' "$1" >> "$2"' sh .svn /r/.git/info/exclude"#
    );
}

// --- Local sequencer ---

#[tokio::test]
async fn test_local_sequencer_runs_in_append_order() {
    let runner = Arc::new(RecordingRunner::new());
    let mut local = LocalSequencer::new(WorkTree::local("/tmp/L"), "git", runner.clone());

    local.fetch_all();
    local.checkout("noname");
    local.push();
    assert_eq!(local.pending().len(), 3);

    local.run().await.expect("batch succeeds");

    assert!(local.pending().is_empty());
    assert_eq!(
        runner.commands(),
        [
            format!("{LOCAL} fetch --all"),
            format!("{LOCAL} checkout noname"),
            format!("{LOCAL} push"),
        ]
    );
}

#[tokio::test]
async fn test_local_sequencer_stops_at_first_failure() {
    let runner = Arc::new(RecordingRunner::new().fail_on("merge"));
    let mut local = LocalSequencer::new(WorkTree::local("/tmp/L"), "git", runner.clone());

    local.checkout("noname");
    local.merge("origin/mainstream");
    local.push_upstream("noname");

    let err = local.run().await.expect_err("merge conflict aborts");
    let gru = err.downcast_ref::<GruError>().expect("typed error");
    let process = gru.as_process().expect("process failure");
    assert_eq!(process.exit_code(), Some(1));
    assert!(process.to_string().contains("merge --no-ff --no-edit origin/mainstream"));

    let commands = runner.commands();
    assert_eq!(commands.len(), 2);
    assert!(commands.iter().all(|line| !line.contains("push")));
    assert!(local.pending().is_empty(), "batch is drained even on failure");
}

#[tokio::test]
async fn test_local_sequencer_binds_captured_values() {
    let runner = Arc::new(RecordingRunner::new().reply("svn info", "1234\n"));
    let mut local = LocalSequencer::new(WorkTree::local("/tmp/L"), "git", runner.clone());

    local.capture(
        "revision",
        Invocation::new("svn").args(["info", "--show-item", "revision", "/tmp/L"]),
    );
    local.commit(Message::literal("SVN r").var("revision"), true);
    local.run().await.expect("batch succeeds");

    assert_eq!(local.captured("revision"), Some("1234"));
    assert_eq!(
        runner.commands().last().map(String::as_str),
        Some(format!("{LOCAL} commit --allow-empty -m \"SVN r1234\"").as_str())
    );
}

#[tokio::test]
async fn test_local_sequencer_rejects_empty_capture() {
    let runner = Arc::new(RecordingRunner::new().reply("svn info", "  \n"));
    let mut local = LocalSequencer::new(WorkTree::local("/tmp/L"), "git", runner.clone());

    local.capture("revision", Invocation::new("svn").args(["info", "/tmp/L"]));
    local.commit(Message::literal("SVN r").var("revision"), true);
    let err = local.run().await.expect_err("empty revision aborts");

    let gru = err.downcast_ref::<GruError>().expect("typed error");
    assert!(matches!(
        gru,
        GruError::Subsystem(inner) if matches!(**inner, SubsystemError::RevisionUnavailable { .. })
    ));
    assert_eq!(runner.commands().len(), 1, "commit never runs");
}

#[tokio::test]
async fn test_local_sequencers_are_independent() {
    let runner = Arc::new(RecordingRunner::new());
    let mut first = LocalSequencer::new(WorkTree::local("/tmp/A"), "git", runner.clone());
    let mut second = LocalSequencer::new(WorkTree::local("/tmp/B"), "git", runner.clone());

    first.fetch_all();
    second.pull();
    first.push();

    second.run().await.expect("second batch");
    first.run().await.expect("first batch");

    assert_eq!(
        runner.commands(),
        [
            "git --git-dir /tmp/B/.git --work-tree /tmp/B pull --no-rebase --no-edit",
            "git --git-dir /tmp/A/.git --work-tree /tmp/A fetch --all",
            "git --git-dir /tmp/A/.git --work-tree /tmp/A push",
        ]
    );
}

// --- Remote session ---

#[tokio::test]
async fn test_remote_session_uses_three_round_trips() {
    let runner = Arc::new(RecordingRunner::new());
    let mut session = open_session(&runner, "push").await;
    assert_eq!(session.root(), Path::new("/home/dev/.gru_remote/work"));

    session.fetch_all();
    session.checkout("noname");
    session.pull();
    session.run().await.expect("batch succeeds");

    assert_eq!(runner.round_trips(), 3);
    let commands = runner.commands();
    assert_eq!(commands[0], "ssh box pwd");
    assert!(commands[1].starts_with("scp "));
    assert!(commands[1].ends_with(" box:/home/dev/.gru_remote/work/push.sh"));
    assert_eq!(commands[2], "ssh box sh -e /home/dev/.gru_remote/work/push.sh");
    assert!(session.pending().is_empty());
}

#[tokio::test]
async fn test_remote_session_script_layout() {
    let runner = Arc::new(RecordingRunner::new());
    let mut session = open_session(&runner, "push").await;
    session.pull();
    session.run().await.expect("batch succeeds");

    let scripts = runner.scripts();
    assert_eq!(scripts.len(), 1);
    insta::assert_snapshot!(scripts[0].trim_end(), @r#"
    #!/bin/sh
    set -e
    export PATH=/usr/local/bin:"$PATH"

    echo '+ git --git-dir /home/dev/.gru_remote/work/.git --work-tree /srv/content pull --no-rebase --no-edit' >&2
    git --git-dir /home/dev/.gru_remote/work/.git --work-tree /srv/content pull --no-rebase --no-edit
    "#);
}

#[tokio::test]
async fn test_remote_session_guards_captures() {
    let runner = Arc::new(RecordingRunner::new());
    let mut session = open_session(&runner, "update").await;
    session.capture(
        "revision",
        Invocation::new("svn").args(["info", "--show-item", "revision", "/srv/content"]),
    );
    session.commit(Message::literal("[remote] SVN r").var("revision"), true);

    let script = session.script();
    assert!(script.contains("\nrevision=$(svn info --show-item revision /srv/content)\n"));
    assert!(script.contains("[ -n \"$revision\" ] || {"));
    assert!(script.contains("exit 1; }"));
    assert!(script.contains(&format!(
        "\n{REMOTE} commit --allow-empty -m \"[remote] SVN r${{revision}}\"\n"
    )));
}

#[tokio::test]
async fn test_remote_session_empty_batch_skips_transfer() {
    let runner = Arc::new(RecordingRunner::new());
    let mut session = open_session(&runner, "go").await;
    session.run().await.expect("nothing to do");

    assert_eq!(runner.commands(), ["ssh box pwd"]);
    assert!(runner.scripts().is_empty());
}

#[tokio::test]
async fn test_remote_session_failure_is_reported() {
    let runner = Arc::new(RecordingRunner::new().fail_on("sh -e"));
    let mut session = open_session(&runner, "pull").await;
    session.add_all();
    session.push();

    let err = session.run().await.expect_err("remote script fails");
    let gru = err.downcast_ref::<GruError>().expect("typed error");
    insta::assert_snapshot!(
        gru.to_string(),
        @r#"process error: "ssh box sh -e /home/dev/.gru_remote/work/pull.sh" exited with code 1: simulated failure"#
    );
}

#[tokio::test]
async fn test_ssh_executor_commands() {
    let runner = Arc::new(RecordingRunner::new());
    let executor = SshExecutor::new(runner.clone(), "box", "ssh", "scp");

    executor
        .reset_dir(Path::new("/home/dev/.gru_remote/work"))
        .await
        .expect("reset succeeds");
    assert_eq!(
        runner.commands(),
        ["ssh box rm -rf /home/dev/.gru_remote/work && mkdir -p /home/dev/.gru_remote/work"]
    );
    assert_eq!(
        executor.repository_url(Path::new("/home/dev/.gru_remote/work/media")),
        "ssh://box/home/dev/.gru_remote/work/media"
    );
}

#[tokio::test]
async fn test_ssh_executor_empty_home_is_an_error() {
    let runner = Arc::new(RecordingRunner::new().reply(" pwd", ""));
    let executor = SshExecutor::new(runner, "box", "ssh", "scp");
    let err = executor.home_dir().await.expect_err("no home reported");
    assert!(err.to_string().contains("box"));
}
