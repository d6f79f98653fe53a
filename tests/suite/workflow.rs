//! Library crates used together the way the binary uses them

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use crossbeam::channel;
use tackle_config::TackleConfig;
use tackle_types::{TextExt, hex_token, parse_query, path_with_components};
use tackle_utils::{Guarded, SerialQueue, write_document};

#[test]
fn queue_jobs_share_guarded_state_with_callers() {
    let queue = SerialQueue::new("workflow-guarded").expect("queue");
    let log = Arc::new(Guarded::new(Vec::<String>::new()));

    for word in ["alpha", "beta", "gamma"] {
        let log = Arc::clone(&log);
        queue
            .run_async(move || log.update(|entries| entries.push(word.to_uppercase())))
            .expect("enqueue");
    }
    log.update(|entries| entries.push("caller".to_string()));

    let snapshot = {
        let log = Arc::clone(&log);
        queue.run_sync(move || log.get()).expect("snapshot")
    };
    queue.shutdown();

    let queued: Vec<_> = snapshot.iter().filter(|e| *e != "caller").cloned().collect();
    assert_eq!(queued, ["ALPHA", "BETA", "GAMMA"]);
    assert!(snapshot.iter().any(|e| e == "caller"));
}

#[test]
fn delayed_save_lands_in_configured_documents_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let docs = dir.path().join("docs");
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "[documents]\ndir = \"{}\"\n[dispatch]\nqueue_label = \"workflow-save\"\n",
            docs.display().to_string().replace('\\', "/")
        ),
    )
    .expect("write config");
    let config = TackleConfig::load_from(&config_path)
        .expect("load config")
        .expect("config present");

    let target = config.documents_dir().expect("documents dir");
    let queue = SerialQueue::new(config.queue_label()).expect("queue");
    let (tx, rx) = channel::bounded(1);

    let name = format!("{}.txt", hex_token(&[0xde, 0xad, 0xbe, 0xef]));
    queue
        .run_after(Duration::from_millis(20), move || {
            let _ = tx.send(write_document(&target, &name, "queued body"));
        })
        .expect("schedule");

    let written = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("job ran")
        .expect("write succeeded");
    queue.shutdown();

    assert_eq!(written, docs.join("deadbeef.txt"));
    assert_eq!(fs::read_to_string(&written).expect("read"), "queued body");
}

#[test]
fn query_values_feed_path_and_text_helpers() {
    let query = parse_query("dir=notes&file=Caf%C3%A9%20menu");
    let dir = query.get("dir").expect("dir");
    let file = query.get("file").expect("file");

    let path = path_with_components(&["/", dir.as_str(), file.as_str()]);
    assert_eq!(path, "/notes/Café menu");
    assert_eq!(file.char_len(), 9);
    assert_eq!(file.substring_to(4).as_deref(), Some("Café"));
}
