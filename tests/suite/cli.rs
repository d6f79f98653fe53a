//! End-to-end runs of the `tackle` binary

use std::fs;

use crate::common::{Sandbox, stderr, stdout};

#[test]
fn version_reads_app_section() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("[app]\nbuild = \"7\"\n");

    let output = sandbox.run(&config, &["version"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "v1.0.0(7)");
}

#[test]
fn version_defaults_without_config_file() {
    let sandbox = Sandbox::new();
    let missing = sandbox.path().join("absent.toml");

    let output = sandbox.run(&missing, &["version"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "v1.0.0(1)");
}

#[test]
fn broken_config_fails_with_path_in_error() {
    let sandbox = Sandbox::new();
    let config = sandbox.path().join("config.toml");
    fs::write(&config, "[app\n").expect("write");

    let output = sandbox.run(&config, &["version"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("config.toml"), "{}", stderr(&output));
}

#[test]
fn query_prints_decoded_pairs_sorted_by_key() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("");

    let output = sandbox.run(&config, &["query", "name=J%C3%BCrgen&age=42&flag"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "age=42\nname=Jürgen\n");
}

#[test]
fn ranges_reports_byte_offsets() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("");

    let output = sandbox.run(&config, &["ranges", "a1b22c333", "[0-9]+"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "1..2\t1\n3..5\t22\n6..9\t333\n");
}

#[test]
fn ranges_ignore_case_and_no_match_exit_code() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("");

    let found = sandbox.run(&config, &["ranges", "--ignore-case", "Cat cAT", "cat"]);
    assert!(found.status.success(), "{}", stderr(&found));
    assert_eq!(stdout(&found), "0..3\tCat\n4..7\tcAT\n");

    let missing = sandbox.run(&config, &["ranges", "Cat", "dog"]);
    assert_eq!(missing.status.code(), Some(1));
    assert_eq!(stdout(&missing).trim(), "no matches");
}

#[test]
fn validate_sets_exit_code() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("");

    let good = sandbox.run(&config, &["validate", "email", "ada@example.com"]);
    assert!(good.status.success(), "{}", stderr(&good));
    assert_eq!(stdout(&good).trim(), "valid");

    let bad = sandbox.run(&config, &["validate", "url", "not a url"]);
    assert_eq!(bad.status.code(), Some(1));
    assert_eq!(stdout(&bad).trim(), "invalid");
}

#[test]
fn save_writes_into_configured_documents_dir() {
    let sandbox = Sandbox::new();
    let docs = sandbox.documents_dir();
    let config = sandbox.write_config(&format!(
        "[documents]\ndir = \"{}\"\n",
        docs.display().to_string().replace('\\', "/")
    ));

    let output = sandbox.run(&config, &["save", "notes.txt", "hello"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        fs::read_to_string(docs.join("notes.txt")).expect("read"),
        "hello"
    );
}

#[test]
fn save_rejects_path_like_names() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("");
    let dir = sandbox.documents_dir();

    let output = sandbox.run(
        &config,
        &["save", "../escape.txt", "x", "--dir", dir.to_str().expect("utf8 path")],
    );

    assert!(!output.status.success());
    assert!(!sandbox.path().join("escape.txt").exists());
}

#[test]
fn count_reports_every_increment() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("");

    let output = sandbox.run(&config, &["count", "--threads", "6", "--iterations", "5000"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "total=30000 expected=30000");
}

#[test]
fn delay_prints_message_from_queue() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("[dispatch]\nqueue_label = \"cli-test\"\n");

    let output = sandbox.run(&config, &["delay", "--seconds", "0.05", "ping"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "ping");
}

#[test]
fn logs_go_to_configured_file_not_stdout() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("");

    let output = sandbox.run(&config, &["version"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(!stdout(&output).contains("Logging initialized"));
    let log = fs::read_to_string(sandbox.path().join("logs").join("tackle.log")).expect("log");
    assert!(log.contains("Logging initialized"), "{log}");
}

#[test]
fn count_rejects_overflowing_total_before_running() {
    let sandbox = Sandbox::new();
    let config = sandbox.write_config("");

    let output = sandbox.run(
        &config,
        &["count", "--threads", "2", "--iterations", &u64::MAX.to_string()],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("overflows"), "{}", stderr(&output));
    assert!(stdout(&output).is_empty());
}
