// Sinkの具象実装

use crate::core::{Message, Sink};
use async_trait::async_trait;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// コンソール出力によるSink実装
#[derive(Debug, Default, Clone)]
pub struct ConsoleSink {
    quiet: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

#[async_trait]
impl Sink for ConsoleSink {
    async fn accept(&self, message: Message) {
        if self.quiet {
            return;
        }
        if message.is_failure() {
            eprintln!("❌ {message}");
        } else {
            println!("📨 {message}");
        }
    }
}

/// 1メッセージ1行のJSONで書き出すSink実装
pub struct JsonLinesSink<W> {
    writer: Mutex<W>,
}

impl JsonLinesSink<std::io::Stdout> {
    /// 標準出力へ書き出す
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W> JsonLinesSink<W>
where
    W: Write + Send,
{
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// 書き込み先を取り出す
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl<W> Sink for JsonLinesSink<W>
where
    W: Write + Send,
{
    async fn accept(&self, message: Message) {
        let line = match serde_json::to_string(&message) {
            Ok(line) => line,
            Err(error) => {
                tracing::warn!(%error, label = %message.source_label, "failed to encode message");
                return;
            }
        };

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = writeln!(writer, "{line}") {
            tracing::warn!(%error, "failed to write message line");
        }
    }
}

/// tracingの構造化イベントとして出力するSink実装
#[derive(Debug, Default, Clone)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Sink for TracingSink {
    async fn accept(&self, message: Message) {
        if message.is_failure() {
            tracing::warn!(
                source = %message.source_label,
                sequence = message.sequence,
                error = %message.payload,
                "work unit failure received"
            );
        } else {
            tracing::info!(
                source = %message.source_label,
                sequence = message.sequence,
                payload = %message.payload,
                "message received"
            );
        }
    }
}

/// メモリ内に蓄積するSink実装（テスト用および検査用）
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    messages: Arc<Mutex<Vec<Message>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 受信順の全メッセージを取得
    pub fn messages(&self) -> Vec<Message> {
        self.lock().clone()
    }

    /// 特定ラベルのメッセージを受信順で取得
    pub fn messages_from(&self, label: &str) -> Vec<Message> {
        self.lock()
            .iter()
            .filter(|message| message.source_label == label)
            .cloned()
            .collect()
    }

    /// 失敗報告のみを取得
    pub fn failures(&self) -> Vec<Message> {
        self.lock()
            .iter()
            .filter(|message| message.is_failure())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Message>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Sink for MemorySink {
    async fn accept(&self, message: Message) {
        self.lock().push(message);
    }
}

/// 何もしないSink実装（ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpSink;

impl NoOpSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Sink for NoOpSink {
    async fn accept(&self, _message: Message) {
        // 何もしない
    }
}
