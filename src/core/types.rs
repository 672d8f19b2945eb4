// エピソードに関連するデータ型定義

use serde::{Deserialize, Serialize};
use std::fmt;

/// メッセージの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// 通常の進捗・結果
    Progress,
    /// ワークユニットの失敗報告
    Failure,
}

/// Producerが発行する不変メッセージ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub source_label: String,
    pub payload: String,
    pub sequence: u64,
    pub kind: MessageKind,
}

impl Message {
    pub fn progress(
        source_label: impl Into<String>,
        payload: impl Into<String>,
        sequence: u64,
    ) -> Self {
        Self {
            source_label: source_label.into(),
            payload: payload.into(),
            sequence,
            kind: MessageKind::Progress,
        }
    }

    pub fn failure(
        source_label: impl Into<String>,
        payload: impl Into<String>,
        sequence: u64,
    ) -> Self {
        Self {
            source_label: source_label.into(),
            payload: payload.into(),
            sequence,
            kind: MessageKind::Failure,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.kind == MessageKind::Failure
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MessageKind::Progress => {
                write!(f, "[{}#{}] {}", self.source_label, self.sequence, self.payload)
            }
            MessageKind::Failure => write!(
                f,
                "[{}#{}] FAILED: {}",
                self.source_label, self.sequence, self.payload
            ),
        }
    }
}

/// 単一Producerの実行結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerReport {
    pub label: String,
    pub messages_sent: u64,
    pub failed: bool,
}

/// Collectorの集計結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectorStats {
    pub received: usize,
    pub failures: usize,
}

/// エピソード全体のサマリー
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeSummary {
    pub total_producers: usize,
    pub messages_received: usize,
    pub failed_producers: usize,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub elapsed_ms: u64,
}
