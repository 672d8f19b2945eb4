// エラーハンドリングの統合テスト
use anyhow::Result;
use async_trait::async_trait;
use fan_in::{
    core::{CoordinationError, Emit, ErrorSeverity, WorkUnit},
    engine::{Coordinator, WorkItem},
    services::{
        DefaultEpisodeConfig, FailingWorkUnit, MemorySink, NumberSeries, Person, PersonJson,
        ReadFile, TimeReport,
    },
};
use std::sync::Arc;
use std::time::Duration;

fn quiet_config(capacity: usize) -> DefaultEpisodeConfig {
    DefaultEpisodeConfig::new(capacity).with_progress_reporting(false)
}

/// 完了しないワークユニット
struct Stalled;

#[async_trait]
impl WorkUnit for Stalled {
    async fn run(&self, _emitter: &mut dyn Emit) -> anyhow::Result<()> {
        std::future::pending::<()>().await;
        Ok(())
    }
}

/// 途中でpanicするワークユニット
struct Exploding;

#[async_trait]
impl WorkUnit for Exploding {
    async fn run(&self, emitter: &mut dyn Emit) -> anyhow::Result<()> {
        emitter.emit("before panic".to_string()).await?;
        panic!("work unit exploded");
    }
}

#[tokio::test]
async fn test_failing_producer_does_not_stop_siblings() -> Result<()> {
    let sink = Arc::new(MemorySink::new());
    let coordinator = Coordinator::new(quiet_config(4));

    let summary = coordinator
        .run_episode(
            vec![
                WorkItem::new("ok", NumberSeries::new("ok", 3)),
                WorkItem::new("bad", FailingWorkUnit::new("disk full").after_steps(1)),
            ],
            Arc::clone(&sink),
        )
        .await?;

    assert_eq!(summary.failed_producers, 1);
    assert_eq!(summary.messages_received, 5);
    assert_eq!(sink.messages_from("ok").len(), 3);

    let failures = sink.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].source_label, "bad");
    assert!(failures[0].payload.contains("disk full"));
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_reports_failure() -> Result<()> {
    let sink = Arc::new(MemorySink::new());
    let coordinator = Coordinator::new(quiet_config(4));

    let summary = coordinator
        .run_episode(
            vec![
                WorkItem::new("good", PersonJson::encode(Person::new("John", "Doe", 30))),
                WorkItem::new("broken", PersonJson::decode("{not json")),
            ],
            Arc::clone(&sink),
        )
        .await?;

    assert_eq!(summary.failed_producers, 1);

    let good: Vec<String> = sink
        .messages_from("good")
        .into_iter()
        .map(|message| message.payload)
        .collect();
    assert_eq!(
        good,
        vec![
            r#"JSON: {"first_name":"John","last_name":"Doe","age":30}"#.to_string(),
            "Decoded Person: John Doe, Age: 30".to_string(),
        ]
    );

    let broken = sink.messages_from("broken");
    assert_eq!(broken.len(), 1);
    assert!(broken[0].is_failure());
    assert!(broken[0].payload.contains("failed to decode person JSON"));
    Ok(())
}

#[tokio::test]
async fn test_missing_file_and_bad_time_are_reported() -> Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    let sink = Arc::new(MemorySink::new());
    let coordinator = Coordinator::new(quiet_config(4));

    let summary = coordinator
        .run_episode(
            vec![
                WorkItem::new("read", ReadFile::new(temp_dir.path().join("example.txt"))),
                WorkItem::new("parse", TimeReport::parse("2024-06-06 12:00:00")),
                WorkItem::new("bad-time", TimeReport::parse("06/06/2024")),
            ],
            Arc::clone(&sink),
        )
        .await?;

    assert_eq!(summary.total_producers, 3);
    assert_eq!(summary.failed_producers, 2);

    let read = sink.messages_from("read");
    assert_eq!(read.len(), 1);
    assert!(read[0].is_failure());
    assert!(read[0].payload.contains("example.txt"));

    let parsed = sink.messages_from("parse");
    assert_eq!(parsed[0].payload, "Parsed Time: 2024-06-06 12:00:00 UTC");
    assert!(sink.messages_from("bad-time")[0].is_failure());
    Ok(())
}

#[tokio::test]
async fn test_panicking_producer_is_counted_as_failed() -> Result<()> {
    let sink = Arc::new(MemorySink::new());
    let coordinator = Coordinator::new(quiet_config(4));

    let summary = coordinator
        .run_episode(
            vec![
                WorkItem::new("boom", Exploding),
                WorkItem::new("steady", NumberSeries::new("steady", 2)),
            ],
            Arc::clone(&sink),
        )
        .await?;

    assert_eq!(summary.total_producers, 2);
    assert_eq!(summary.failed_producers, 1);
    assert_eq!(sink.messages_from("steady").len(), 2);

    // panicも失敗メッセージとしてSinkに届く
    let boom = sink.messages_from("boom");
    assert_eq!(boom.len(), 2);
    assert_eq!(boom[0].payload, "before panic");
    assert!(boom[1].is_failure());
    assert!(boom[1].payload.contains("work unit exploded"));
    Ok(())
}

#[tokio::test]
async fn test_zero_capacity_is_rejected() {
    let coordinator = Coordinator::new(quiet_config(0));

    let error = coordinator
        .run_episode(
            vec![WorkItem::new("P1", NumberSeries::new("P1", 1))],
            Arc::new(MemorySink::new()),
        )
        .await
        .unwrap_err();

    assert!(matches!(error, CoordinationError::ConfigurationError { .. }));
    assert_eq!(error.severity(), ErrorSeverity::High);
    assert!(!error.is_protocol_violation());
}

#[tokio::test(start_paused = true)]
async fn test_barrier_timeout_aborts_episode() {
    let config = quiet_config(4).with_barrier_timeout(Some(Duration::from_millis(500)));
    let coordinator = Coordinator::new(config);
    let sink = Arc::new(MemorySink::new());

    let error = coordinator
        .run_episode(
            vec![
                WorkItem::new("stuck", Stalled),
                WorkItem::new("done", NumberSeries::new("done", 1)),
            ],
            Arc::clone(&sink),
        )
        .await
        .unwrap_err();

    match error {
        CoordinationError::BarrierTimeout {
            timeout_ms,
            outstanding,
        } => {
            assert_eq!(timeout_ms, 500);
            assert_eq!(outstanding, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
