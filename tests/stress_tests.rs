//! Stress and concurrency tests for the history store and engine
//!
//! These tests verify that concurrent appends never lose entries and that
//! sessions stay independent under load. No processes are spawned.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use bang_history::config::Config;
use bang_history::domain::{HistoryConfig, MemoryHistoryStore};
use bang_history::storage::JsonFileHistoryStore;
use bang_history::{
    BangEngine, CommandExecutor, CommandOutput, HistoryStore, MessageOutcome, Result,
    SessionContext,
};

struct EchoExecutor;

#[async_trait]
impl CommandExecutor for EchoExecutor {
    async fn execute(&self, _session: &SessionContext, command: &str) -> Result<CommandOutput> {
        Ok(CommandOutput {
            stdout: command.to_string(),
            stderr: String::new(),
            exit_code: 0,
            duration_ms: 0,
        })
    }
}

fn store(max_entries: usize) -> Arc<MemoryHistoryStore> {
    Arc::new(MemoryHistoryStore::new(&HistoryConfig { max_entries }))
}

// ============== Concurrent Appends ==============

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_same_session_lose_nothing() {
    let history = store(10_000);

    let mut handles = vec![];
    for i in 0..500 {
        let h = Arc::clone(&history);
        handles.push(tokio::spawn(async move {
            h.append("shared", &format!("cmd {i}")).await
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let record = history.get("shared").await.unwrap().unwrap();
    assert_eq!(record.len(), 500);

    let mut seen: Vec<_> = record.commands.clone();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 500, "every append must be retained exactly once");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_respect_window() {
    let history = store(50);

    let mut handles = vec![];
    for i in 0..400 {
        let h = Arc::clone(&history);
        handles.push(tokio::spawn(async move {
            h.append("shared", &format!("cmd {i}")).await
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(history.len("shared"), 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sessions_are_independent() {
    let history = store(1_000);

    let mut handles = vec![];
    for s in 0..20 {
        for i in 0..25 {
            let h = Arc::clone(&history);
            handles.push(tokio::spawn(async move {
                h.append(&format!("session-{s}"), &format!("s{s} cmd {i}"))
                    .await
            }));
        }
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(history.session_count(), 20);
    for s in 0..20 {
        let record = history.get(&format!("session-{s}")).await.unwrap().unwrap();
        assert_eq!(record.len(), 25);
        let prefix = format!("s{s} ");
        assert!(record.commands.iter().all(|c| c.starts_with(&prefix)));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sequential_order_preserved_per_task() {
    let history = store(10_000);

    let mut handles = vec![];
    for t in 0..8 {
        let h = Arc::clone(&history);
        handles.push(tokio::spawn(async move {
            for i in 0..50 {
                h.append("shared", &format!("t{t}-{i:03}")).await.unwrap();
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    let record = history.get("shared").await.unwrap().unwrap();
    // Each task's own appends must appear in the order it made them
    for t in 0..8 {
        let prefix = format!("t{t}-");
        let mine: Vec<_> = record
            .commands
            .iter()
            .filter(|c| c.starts_with(&prefix))
            .collect();
        assert_eq!(mine.len(), 50);
        assert!(mine.windows(2).all(|w| w[0] < w[1]));
    }
}

// ============== Engine Under Load ==============

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_expansions_across_sessions() {
    let config = Config::default();
    let engine = Arc::new(BangEngine::in_memory(&config, Arc::new(EchoExecutor)));

    for s in 0..10 {
        engine
            .record(&format!("chan-{s}"), &format!("deploy {s}"))
            .await
            .unwrap();
    }

    let mut handles = vec![];
    for s in 0..10 {
        for _ in 0..10 {
            let e = Arc::clone(&engine);
            handles.push(tokio::spawn(async move {
                let session = SessionContext::new(format!("chan-{s}"));
                let outcome = e.handle_message(&session, "!deploy").await.unwrap();
                (s, outcome)
            }));
        }
    }

    for handle in handles {
        let (s, outcome) = handle.await.unwrap();
        match outcome {
            MessageOutcome::Executed { command, .. } => assert_eq!(command, format!("deploy {s}")),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    for s in 0..10 {
        let record = engine.history(&format!("chan-{s}")).await.unwrap().unwrap();
        assert_eq!(record.len(), 11);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_appends_to_file_store() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("history.json");
    let history = Arc::new(
        JsonFileHistoryStore::open(&path, &HistoryConfig { max_entries: 1_000 })
            .await
            .unwrap(),
    );

    let mut handles = vec![];
    for i in 0..50 {
        let h = Arc::clone(&history);
        handles.push(tokio::spawn(async move {
            h.append("shared", &format!("cmd {i}")).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let reopened = JsonFileHistoryStore::open(&path, &HistoryConfig { max_entries: 1_000 })
        .await
        .unwrap();
    assert_eq!(reopened.get("shared").await.unwrap().unwrap().len(), 50);
}

// ============== Throughput ==============

#[tokio::test]
async fn test_resolution_is_fast_on_full_history() {
    let config = Config::default();
    let engine = BangEngine::in_memory(&config, Arc::new(EchoExecutor));
    for i in 0..config.history {
        engine.record("chan", &format!("cmd {i}")).await.unwrap();
    }

    let start = Instant::now();
    for _ in 0..1_000 {
        engine.expand("chan", "!?nomatch-at-all").await.unwrap_err();
    }
    assert!(
        start.elapsed().as_secs() < 5,
        "1000 worst-case lookups took {:?}",
        start.elapsed()
    );
}
