// エピソード全体の統合テスト
use anyhow::Result;
use fan_in::{
    core::{EpisodeConfig, MessageKind},
    engine::{run_episode, Coordinator, WorkItem},
    services::{DefaultEpisodeConfig, EulerProblem, MemorySink, NumberSeries, StringAnalysis},
    App,
};
use std::sync::Arc;

fn quiet_config(capacity: usize) -> DefaultEpisodeConfig {
    DefaultEpisodeConfig::new(capacity).with_progress_reporting(false)
}

#[tokio::test]
async fn test_two_producers_five_messages_each() -> Result<()> {
    let sink = Arc::new(MemorySink::new());
    let coordinator = Coordinator::new(quiet_config(100));

    let summary = coordinator
        .run_episode(
            vec![
                WorkItem::new("P1", NumberSeries::new("P1", 5)),
                WorkItem::new("P2", NumberSeries::new("P2", 5)),
            ],
            Arc::clone(&sink),
        )
        .await?;

    assert_eq!(summary.total_producers, 2);
    assert_eq!(summary.messages_received, 10);
    assert_eq!(summary.failed_producers, 0);
    assert_eq!(sink.len(), 10);

    // 各Producer内の順序は保持される
    for label in ["P1", "P2"] {
        let payloads: Vec<String> = sink
            .messages_from(label)
            .into_iter()
            .map(|message| message.payload)
            .collect();
        let expected: Vec<String> = (1..=5).map(|i| format!("{label}: {i}")).collect();
        assert_eq!(payloads, expected);

        let sequences: Vec<u64> = sink
            .messages_from(label)
            .iter()
            .map(|message| message.sequence)
            .collect();
        assert_eq!(sequences, vec![0, 1, 2, 3, 4]);
    }

    Ok(())
}

#[tokio::test]
async fn test_empty_episode_completes_immediately() -> Result<()> {
    let sink = Arc::new(MemorySink::new());
    let coordinator = Coordinator::new(quiet_config(1));

    let summary = coordinator.run_episode(Vec::new(), Arc::clone(&sink)).await?;

    assert_eq!(summary.total_producers, 0);
    assert_eq!(summary.messages_received, 0);
    assert!(sink.is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_producers_deliver_every_message() -> Result<()> {
    const PRODUCERS: usize = 64;
    const PER_PRODUCER: u64 = 50;

    let sink = Arc::new(MemorySink::new());
    let coordinator = Coordinator::new(quiet_config(8));

    let work = (0..PRODUCERS)
        .map(|i| {
            let label = format!("worker-{i}");
            WorkItem::new(label.clone(), NumberSeries::new(label, PER_PRODUCER))
        })
        .collect();

    let summary = coordinator.run_episode(work, Arc::clone(&sink)).await?;

    assert_eq!(summary.messages_received, PRODUCERS * PER_PRODUCER as usize);
    assert_eq!(sink.len(), PRODUCERS * PER_PRODUCER as usize);
    assert!(sink
        .messages()
        .iter()
        .all(|message| message.kind == MessageKind::Progress));
    Ok(())
}

#[tokio::test]
async fn test_consecutive_episodes_use_fresh_channels() -> Result<()> {
    let sink = Arc::new(MemorySink::new());
    let app = App::new(quiet_config(2), Arc::clone(&sink));

    let numbers = app
        .run(vec![
            WorkItem::new("Goroutine 1", NumberSeries::new("Goroutine 1", 5)),
            WorkItem::new("Goroutine 2", NumberSeries::new("Goroutine 2", 5)),
        ])
        .await?;
    let strings = app
        .run(vec![
            WorkItem::new("racecar", StringAnalysis::new("racecar")),
            WorkItem::new("hello", StringAnalysis::new("hello")),
        ])
        .await?;

    assert_eq!(numbers.messages_received, 10);
    assert_eq!(strings.messages_received, 2);

    let racecar = sink.messages_from("racecar");
    assert_eq!(
        racecar[0].payload,
        "Original: racecar, Reversed: racecar, IsPalindrome: true"
    );
    let hello = sink.messages_from("hello");
    assert_eq!(
        hello[0].payload,
        "Original: hello, Reversed: olleh, IsPalindrome: false"
    );
    assert_eq!(app.config().channel_capacity(), 2);
    Ok(())
}

#[tokio::test]
async fn test_euler_set_via_high_level_api() -> Result<()> {
    let sink = Arc::new(MemorySink::new());

    let summary = run_episode(
        EulerProblem::classic_set()
            .into_iter()
            .map(|problem| (problem.label(), problem)),
        Arc::clone(&sink),
    )
    .await?;

    assert_eq!(summary.total_producers, 5);
    assert_eq!(summary.messages_received, 5);
    assert_eq!(summary.failed_producers, 0);

    let mut answers: Vec<String> = sink
        .messages()
        .into_iter()
        .filter_map(|message| message.payload.split(" = ").nth(1).map(str::to_string))
        .collect();
    answers.sort();
    let mut expected: Vec<String> = ["233168", "4613732", "6857", "906609", "232792560"]
        .iter()
        .map(|answer| answer.to_string())
        .collect();
    expected.sort();
    assert_eq!(answers, expected);
    Ok(())
}
