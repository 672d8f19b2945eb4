// 協調処理システムのトレイト定義
// 全ての抽象化インターフェースを定義

use super::types::Message;
use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use std::time::Duration;

/// エピソードの設定を抽象化するトレイト
#[automock]
pub trait EpisodeConfig: Send + Sync {
    /// チャンネル容量を取得（満杯時はProducerが待機する）
    fn channel_capacity(&self) -> usize;

    /// バリア待機の期限を取得（Noneは無期限）
    fn barrier_timeout(&self) -> Option<Duration>;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

// EpisodeConfig for Box<dyn EpisodeConfig>
impl EpisodeConfig for Box<dyn EpisodeConfig> {
    fn channel_capacity(&self) -> usize {
        self.as_ref().channel_capacity()
    }

    fn barrier_timeout(&self) -> Option<Duration> {
        self.as_ref().barrier_timeout()
    }

    fn enable_progress_reporting(&self) -> bool {
        self.as_ref().enable_progress_reporting()
    }
}

/// メッセージの受け取り先を抽象化するトレイト
#[automock]
#[async_trait]
pub trait Sink: Send + Sync {
    /// メッセージを1件受け取る
    async fn accept(&self, message: Message);
}

// Sink for Box<dyn Sink>
#[async_trait]
impl Sink for Box<dyn Sink> {
    async fn accept(&self, message: Message) {
        self.as_ref().accept(message).await
    }
}

/// ワークユニットが結果を発行するための口
#[async_trait]
pub trait Emit: Send {
    /// ペイロードを1件発行する（チャンネル満杯時は待機）
    async fn emit(&mut self, payload: String) -> Result<()>;
}

/// Producer内で実行される作業単位
#[async_trait]
pub trait WorkUnit: Send + Sync {
    /// 作業を実行し、結果を`emitter`経由で発行する
    async fn run(&self, emitter: &mut dyn Emit) -> Result<()>;
}

// WorkUnit for Box<dyn WorkUnit>
#[async_trait]
impl WorkUnit for Box<dyn WorkUnit> {
    async fn run(&self, emitter: &mut dyn Emit) -> Result<()> {
        self.as_ref().run(emitter).await
    }
}
