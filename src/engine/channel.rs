// Channel - クローズ可能なメッセージチャンネル
// 複数Producer → 単一Collector。クローズはCoordinatorのみが一度だけ行う

use crate::core::{CoordinationError, CoordinationResult, Message};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::{mpsc, Notify};

/// 送信側・受信側・クローズ側で共有される状態
///
/// 送信は読み取りロックを保持したままキューへ積むため、
/// 書き込みロックでクローズした後に積まれるメッセージは存在しない
#[derive(Debug, Default)]
struct ChannelState {
    closed: RwLock<bool>,
    close_signal: Notify,
}

impl ChannelState {
    fn is_closed(&self) -> bool {
        *self.read()
    }

    fn read(&self) -> RwLockReadGuard<'_, bool> {
        self.closed.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, bool> {
        self.closed.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// 新しいエピソード用チャンネルを作成
///
/// `capacity`が満杯になると送信側は空きができるまで待機する（バックプレッシャー）。
/// 容量0は1として扱う。
pub fn message_channel(capacity: usize) -> (MessageSender, MessageReceiver, ChannelCloser) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let state = Arc::new(ChannelState::default());

    let sender = MessageSender {
        tx: tx.clone(),
        state: Arc::clone(&state),
    };
    let receiver = MessageReceiver {
        rx,
        state: Arc::clone(&state),
        draining: false,
    };
    let closer = ChannelCloser {
        state,
        keepalive: Some(tx),
    };

    (sender, receiver, closer)
}

/// 送信ハンドル（Producerごとにクローンして配る）
#[derive(Debug, Clone)]
pub struct MessageSender {
    tx: mpsc::Sender<Message>,
    state: Arc<ChannelState>,
}

impl MessageSender {
    /// メッセージを送信
    ///
    /// クローズ後の送信はプログラミングエラーとして`SendOnClosedChannel`を返す
    pub async fn send(&self, message: Message) -> CoordinationResult<()> {
        if self.state.is_closed() {
            return Err(CoordinationError::send_on_closed(
                message.source_label,
                message.sequence,
            ));
        }

        // 容量の空きを待つ間はロックを持たない
        let Ok(permit) = self.tx.reserve().await else {
            return Err(CoordinationError::send_on_closed(
                message.source_label,
                message.sequence,
            ));
        };

        let closed = self.state.read();
        if *closed {
            return Err(CoordinationError::send_on_closed(
                message.source_label,
                message.sequence,
            ));
        }
        permit.send(message);
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }
}

/// 受信ハンドル（Collector専用）
#[derive(Debug)]
pub struct MessageReceiver {
    rx: mpsc::Receiver<Message>,
    state: Arc<ChannelState>,
    draining: bool,
}

impl MessageReceiver {
    /// 次のメッセージを受信
    ///
    /// チャンネルが空でオープンな間は待機する。
    /// クローズ済みかつ残りを全て読み終えた場合は`None`（ストリーム終端）を返す。
    pub async fn recv(&mut self) -> Option<Message> {
        loop {
            if !self.draining && self.state.is_closed() {
                // 新規送信を拒否しつつ、バッファ済みのメッセージは読み切る
                self.rx.close();
                self.draining = true;
            }

            if self.draining {
                return self.rx.recv().await;
            }

            tokio::select! {
                biased;
                message = self.rx.recv() => return message,
                _ = self.state.close_signal.notified() => {}
            }
        }
    }
}

/// クローズ権限（Coordinatorが唯一保持する）
#[derive(Debug)]
pub struct ChannelCloser {
    state: Arc<ChannelState>,
    keepalive: Option<mpsc::Sender<Message>>,
}

impl ChannelCloser {
    /// チャンネルをクローズ
    ///
    /// 二度目のクローズは`ChannelAlreadyClosed`
    pub fn close(&mut self) -> CoordinationResult<()> {
        {
            let mut closed = self.state.write();
            if *closed {
                return Err(CoordinationError::ChannelAlreadyClosed);
            }
            *closed = true;
        }

        self.keepalive.take();
        self.state.close_signal.notify_one();
        tracing::debug!("message channel closed");
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }
}
