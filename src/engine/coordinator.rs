// Coordinator - ファンアウト/ファンインのオーケストレーション
// チャンネルとバリアを所有し、1エピソードを最後まで管理する

use super::{
    barrier::Barrier,
    channel::{message_channel, ChannelCloser},
    collector::spawn_collector,
    producer::spawn_producer,
};
use crate::core::{
    CollectorStats, CoordinationError, CoordinationResult, EpisodeConfig, EpisodeSummary,
    ProducerReport, Sink, WorkUnit,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

/// ラベル付きワークユニット
#[derive(Clone)]
pub struct WorkItem {
    pub label: String,
    pub unit: Arc<dyn WorkUnit>,
}

impl WorkItem {
    pub fn new(label: impl Into<String>, unit: impl WorkUnit + 'static) -> Self {
        Self {
            label: label.into(),
            unit: Arc::new(unit),
        }
    }
}

impl std::fmt::Debug for WorkItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkItem").field("label", &self.label).finish()
    }
}

/// エピソードコーディネーター
///
/// エピソードごとに新しいチャンネルとバリアを確保し、再利用しない。
pub struct Coordinator<C> {
    config: Arc<C>,
}

impl<C> Coordinator<C>
where
    C: EpisodeConfig,
{
    pub fn new(config: C) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// 設定への参照を取得
    pub fn config(&self) -> &C {
        &self.config
    }

    /// 1エピソードを実行
    ///
    /// 全Producerの完了をバリアで待ってからチャンネルをクローズし、
    /// Collectorが読み切るまで待機してから返る。
    pub async fn run_episode<S>(
        &self,
        work_units: Vec<WorkItem>,
        sink: Arc<S>,
    ) -> CoordinationResult<EpisodeSummary>
    where
        S: Sink + ?Sized + 'static,
    {
        let capacity = self.config.channel_capacity();
        if capacity == 0 {
            return Err(CoordinationError::configuration(
                "チャンネル容量は1以上である必要があります",
            ));
        }

        let started_at = chrono::Utc::now();
        let start_time = Instant::now();
        let total_producers = work_units.len();

        let (sender, receiver, mut closer) = message_channel(capacity);
        let barrier = Barrier::shared(total_producers);

        if self.config.enable_progress_reporting() {
            tracing::info!(producers = total_producers, capacity, "episode started");
        }

        // Producer起動（並行）
        let producer_handles: Vec<_> = work_units
            .into_iter()
            .map(|item| spawn_producer(item.label, item.unit, sender.clone(), &barrier))
            .collect();
        drop(sender);

        // Collector起動
        let collector_handle = spawn_collector(receiver, sink);

        // 全Producerの完了を待機
        let waited = match self.config.barrier_timeout() {
            Some(timeout) => barrier.wait_timeout(timeout).await,
            None => {
                barrier.wait().await;
                Ok(())
            }
        };
        if let Err(error) = waited {
            tracing::error!(%error, "episode aborted while waiting for producers");
            for handle in &producer_handles {
                handle.abort();
            }
            close_and_drain(&mut closer, collector_handle).await;
            return Err(error);
        }

        if barrier.has_underflowed() {
            let error = CoordinationError::count_underflow(barrier.initial());
            tracing::error!(%error, "barrier underflow detected");
            close_and_drain(&mut closer, collector_handle).await;
            return Err(error);
        }

        // 全送信が完了した後にのみクローズする
        closer.close()?;

        // Collectorが読み切るまで待機
        let stats = collector_handle.await?;

        let (reports, panicked) = join_producers(producer_handles).await?;
        let failed_producers = reports.iter().filter(|report| report.failed).count() + panicked;

        let summary = EpisodeSummary {
            total_producers,
            messages_received: stats.received,
            failed_producers,
            started_at,
            elapsed_ms: start_time.elapsed().as_millis() as u64,
        };

        if self.config.enable_progress_reporting() {
            tracing::info!(
                producers = summary.total_producers,
                messages = summary.messages_received,
                failed = summary.failed_producers,
                elapsed_ms = summary.elapsed_ms,
                "episode completed"
            );
        }

        Ok(summary)
    }
}

/// エラー終了時もチャンネルをクローズし、Collectorがバッファを読み切るまで待つ
///
/// 戻った後にSinkへ届くメッセージはない
async fn close_and_drain(closer: &mut ChannelCloser, collector: JoinHandle<CollectorStats>) {
    if let Err(error) = closer.close() {
        tracing::debug!(%error, "channel was already closed");
    }
    match collector.await {
        Ok(stats) => tracing::debug!(received = stats.received, "collector drained after abort"),
        Err(error) => tracing::error!(%error, "collector task failed"),
    }
}

/// Producerタスクを回収
///
/// panicしたProducerは失敗としてカウントするのみで、兄弟には影響させない。
/// プロトコル違反は最初の1件をエラーとして返す。
async fn join_producers(
    handles: Vec<JoinHandle<CoordinationResult<ProducerReport>>>,
) -> CoordinationResult<(Vec<ProducerReport>, usize)> {
    let mut reports = Vec::with_capacity(handles.len());
    let mut panicked = 0;
    let mut violation = None;

    for handle in handles {
        match handle.await {
            Ok(Ok(report)) => reports.push(report),
            Ok(Err(error)) => {
                violation.get_or_insert(error);
            }
            Err(join_error) if join_error.is_panic() => {
                tracing::error!(error = %join_error, "producer panicked");
                panicked += 1;
            }
            Err(join_error) => return Err(CoordinationError::task(join_error)),
        }
    }

    match violation {
        Some(error) => Err(error),
        None => Ok((reports, panicked)),
    }
}
