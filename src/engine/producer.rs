// Producer - ワークユニット実行とメッセージ発行

use super::barrier::{BarrierHandle, ReleaseGuard};
use super::channel::MessageSender;
use crate::core::{CoordinationError, CoordinationResult, Emit, Message, ProducerReport, WorkUnit};
use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// ラベルと連番を付与してチャンネルへ送信するエミッター
#[derive(Debug)]
pub struct Emitter {
    label: String,
    next_sequence: u64,
    sender: MessageSender,
    violation: Option<CoordinationError>,
}

impl Emitter {
    pub fn new(label: impl Into<String>, sender: MessageSender) -> Self {
        Self {
            label: label.into(),
            next_sequence: 0,
            sender,
            violation: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// 送信済みメッセージ数
    pub fn emitted(&self) -> u64 {
        self.next_sequence
    }

    /// 失敗報告メッセージを送信
    pub async fn emit_failure(&mut self, description: String) -> CoordinationResult<()> {
        let message = Message::failure(self.label.clone(), description, self.next_sequence);
        self.sender.send(message).await?;
        self.next_sequence += 1;
        Ok(())
    }

    /// 送信中に発生したプロトコル違反を取り出す
    ///
    /// ワークユニットが送信エラーを握りつぶしても、ここで検出できる
    pub fn take_violation(&mut self) -> Option<CoordinationError> {
        self.violation.take()
    }
}

#[async_trait]
impl Emit for Emitter {
    async fn emit(&mut self, payload: String) -> anyhow::Result<()> {
        let message = Message::progress(self.label.clone(), payload, self.next_sequence);
        match self.sender.send(message).await {
            Ok(()) => {
                self.next_sequence += 1;
                Ok(())
            }
            Err(error) => {
                let description = error.to_string();
                self.violation = Some(error);
                Err(anyhow::anyhow!(description))
            }
        }
    }
}

/// Producer本体
///
/// バリアの解放は`guard`のDropで行うため、どの経路で終了しても1回だけ実行される。
pub async fn run_producer<W>(
    label: String,
    work_unit: &W,
    sender: MessageSender,
    guard: ReleaseGuard,
) -> CoordinationResult<ProducerReport>
where
    W: WorkUnit + ?Sized,
{
    let _guard = guard;
    let mut emitter = Emitter::new(label.clone(), sender);
    tracing::debug!(producer = %label, "producer started");

    // panicも通常の失敗と同じくSinkへ報告する
    let outcome = match AssertUnwindSafe(work_unit.run(&mut emitter)).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(panic) => Err(anyhow::anyhow!(
            "work unit panicked: {}",
            panic_message(panic.as_ref())
        )),
    };

    if let Some(violation) = emitter.take_violation() {
        tracing::error!(producer = %label, error = %violation, "protocol violation while sending");
        return Err(violation);
    }

    let failed = match outcome {
        Ok(()) => false,
        Err(source) => {
            let description = format!("{source:#}");
            let failure = CoordinationError::work_unit_failure(label.clone(), source);
            tracing::warn!(producer = %label, error = %failure, "work unit failed");

            // 失敗はSink経由で観測できるようにし、兄弟Producerは止めない
            emitter.emit_failure(description).await?;
            true
        }
    };

    tracing::debug!(
        producer = %label,
        messages = emitter.emitted(),
        failed,
        "producer finished"
    );

    Ok(ProducerReport {
        label,
        messages_sent: emitter.emitted(),
        failed,
    })
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Producerタスクを起動
///
/// ガードは起動前に取得してタスクへ移すため、タスクが一度もポーリングされずに
/// 破棄された場合でもバリアは解放される。
pub fn spawn_producer<W>(
    label: String,
    work_unit: Arc<W>,
    sender: MessageSender,
    barrier: &BarrierHandle,
) -> tokio::task::JoinHandle<CoordinationResult<ProducerReport>>
where
    W: WorkUnit + ?Sized + 'static,
{
    let guard = barrier.guard();
    tokio::spawn(async move { run_producer(label, work_unit.as_ref(), sender, guard).await })
}
