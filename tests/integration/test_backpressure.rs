// 容量制限下での統合テスト
use anyhow::Result;
use async_trait::async_trait;
use fan_in::{
    core::{Message, Sink},
    engine::{Coordinator, WorkItem},
    services::{DefaultEpisodeConfig, MemorySink, NumberSeries},
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// 受信のたびに待機する低速なSink
struct SlowSink {
    delay: Duration,
    inner: MemorySink,
}

#[async_trait]
impl Sink for SlowSink {
    async fn accept(&self, message: Message) {
        tokio::time::sleep(self.delay).await;
        self.inner.accept(message).await;
    }
}

fn producers(count: usize, per_producer: u64, interval: Duration) -> Vec<WorkItem> {
    (0..count)
        .map(|i| {
            let label = format!("P{i}");
            WorkItem::new(
                label.clone(),
                NumberSeries::new(label, per_producer).with_interval(interval),
            )
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_capacity_one_with_slow_sink_loses_nothing() -> Result<()> {
    const PRODUCERS: usize = 4;
    const PER_PRODUCER: u64 = 10;

    let memory = MemorySink::new();
    let sink = Arc::new(SlowSink {
        delay: Duration::from_millis(20),
        inner: memory.clone(),
    });
    let coordinator =
        Coordinator::new(DefaultEpisodeConfig::new(1).with_progress_reporting(false));

    let summary = coordinator
        .run_episode(producers(PRODUCERS, PER_PRODUCER, Duration::ZERO), sink)
        .await?;

    let expected = PRODUCERS * PER_PRODUCER as usize;
    assert_eq!(summary.messages_received, expected);
    // run_episodeが返った時点で全メッセージがSinkに届いている
    assert_eq!(memory.len(), expected);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_delayed_producers_keep_per_producer_order() -> Result<()> {
    const PRODUCERS: usize = 3;
    const PER_PRODUCER: u64 = 6;

    let sink = Arc::new(MemorySink::new());
    let coordinator =
        Coordinator::new(DefaultEpisodeConfig::new(1).with_progress_reporting(false));

    let summary = coordinator
        .run_episode(
            producers(PRODUCERS, PER_PRODUCER, Duration::from_millis(50)),
            Arc::clone(&sink),
        )
        .await?;

    assert_eq!(summary.messages_received, PRODUCERS * PER_PRODUCER as usize);

    let mut by_label: HashMap<String, Vec<u64>> = HashMap::new();
    for message in sink.messages() {
        by_label
            .entry(message.source_label.clone())
            .or_default()
            .push(message.sequence);
    }

    assert_eq!(by_label.len(), PRODUCERS);
    for sequences in by_label.values() {
        let expected: Vec<u64> = (0..PER_PRODUCER).collect();
        assert_eq!(sequences, &expected);
    }
    Ok(())
}
