// Collector - チャンネルを読み切ってSinkへ転送

use super::channel::MessageReceiver;
use crate::core::{CollectorStats, Sink};
use std::sync::Arc;

/// Collector本体
///
/// ストリーム終端を受け取った時点で正常終了する。タイムアウトはない。
pub async fn run_collector<S>(mut receiver: MessageReceiver, sink: Arc<S>) -> CollectorStats
where
    S: Sink + ?Sized,
{
    let mut stats = CollectorStats::default();

    while let Some(message) = receiver.recv().await {
        if message.is_failure() {
            stats.failures += 1;
        }
        stats.received += 1;
        sink.accept(message).await;
    }

    tracing::debug!(
        received = stats.received,
        failures = stats.failures,
        "collector observed end of stream"
    );
    stats
}

/// Collectorタスクを起動
pub fn spawn_collector<S>(
    receiver: MessageReceiver,
    sink: Arc<S>,
) -> tokio::task::JoinHandle<CollectorStats>
where
    S: Sink + ?Sized + 'static,
{
    tokio::spawn(run_collector(receiver, sink))
}
