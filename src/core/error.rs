// Custom error types for episode coordination
// ファンアウト/ファンイン協調処理専用のエラー型定義

use thiserror::Error;

/// 協調処理固有のエラー型
#[derive(Error, Debug)]
pub enum CoordinationError {
    #[error("バリアカウントアンダーフロー: 残り0のバリアを解放しようとしました (初期値: {initial})")]
    CountUnderflow { initial: usize },

    #[error("クローズ済みチャンネルへの送信: {label} (sequence: {sequence})")]
    SendOnClosedChannel { label: String, sequence: u64 },

    #[error("チャンネルは既にクローズされています")]
    ChannelAlreadyClosed,

    #[error("ワークユニット失敗: {label} - {source}")]
    WorkUnitFailure {
        label: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("バリア待機タイムアウト: {timeout_ms}ms経過後も{outstanding}個のProducerが未完了")]
    BarrierTimeout { timeout_ms: u64, outstanding: usize },

    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl CoordinationError {
    /// バリアアンダーフローエラーの作成
    pub fn count_underflow(initial: usize) -> Self {
        Self::CountUnderflow { initial }
    }

    /// クローズ済みチャンネル送信エラーの作成
    pub fn send_on_closed(label: impl Into<String>, sequence: u64) -> Self {
        Self::SendOnClosedChannel {
            label: label.into(),
            sequence,
        }
    }

    /// ワークユニット失敗エラーの作成
    pub fn work_unit_failure(label: impl Into<String>, source: anyhow::Error) -> Self {
        Self::WorkUnitFailure {
            label: label.into(),
            source,
        }
    }

    /// バリアタイムアウトエラーの作成
    pub fn barrier_timeout(timeout_ms: u64, outstanding: usize) -> Self {
        Self::BarrierTimeout {
            timeout_ms,
            outstanding,
        }
    }

    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// タスクエラーの作成
    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::TaskError { source }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CountUnderflow { .. }
            | Self::SendOnClosedChannel { .. }
            | Self::ChannelAlreadyClosed => ErrorSeverity::Critical,
            Self::ConfigurationError { .. } | Self::BarrierTimeout { .. } => ErrorSeverity::High,
            Self::TaskError { .. } => ErrorSeverity::Medium,
            Self::WorkUnitFailure { .. } => ErrorSeverity::Low,
        }
    }

    /// エラーが回復可能かどうかを判定
    ///
    /// プロトコル違反（バリア・チャンネルの誤用）はエピソードを中断させる
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::CountUnderflow { .. }
            | Self::SendOnClosedChannel { .. }
            | Self::ChannelAlreadyClosed => false,
            Self::ConfigurationError { .. } => false,
            Self::BarrierTimeout { .. } => false,
            Self::TaskError { .. } => true,
            Self::WorkUnitFailure { .. } => true,
        }
    }

    /// プロトコル違反かどうか
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::CountUnderflow { .. }
                | Self::SendOnClosedChannel { .. }
                | Self::ChannelAlreadyClosed
        )
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 低重要度 - ログ出力程度
    Low,
    /// 中重要度 - 警告レベル
    Medium,
    /// 高重要度 - 要対応
    High,
    /// 致命的 - エピソード中断レベル
    Critical,
}

impl ErrorSeverity {
    /// 重要度の文字列表現を取得
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// 協調処理の結果型
pub type CoordinationResult<T> = std::result::Result<T, CoordinationError>;

impl From<tokio::task::JoinError> for CoordinationError {
    fn from(error: tokio::task::JoinError) -> Self {
        CoordinationError::TaskError { source: error }
    }
}
