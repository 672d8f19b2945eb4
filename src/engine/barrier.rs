// Barrier - カウントダウン同期プリミティブ
// 未完了Producer数が0になった時点で待機者を解放する

use crate::core::{CoordinationError, CoordinationResult};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::sync::Notify;

/// Producerと共有するバリアハンドル
pub type BarrierHandle = Arc<Barrier>;

/// カウントダウンバリア
///
/// カウンタは`release_one`と`wait`経由でのみ操作する。
#[derive(Debug)]
pub struct Barrier {
    initial: usize,
    outstanding: AtomicUsize,
    underflowed: AtomicBool,
    zero: Notify,
}

impl Barrier {
    /// `n`個の未完了Producerで初期化
    pub fn new(n: usize) -> Self {
        Self {
            initial: n,
            outstanding: AtomicUsize::new(n),
            underflowed: AtomicBool::new(false),
            zero: Notify::new(),
        }
    }

    /// 共有用ハンドルとして作成
    pub fn shared(n: usize) -> BarrierHandle {
        Arc::new(Self::new(n))
    }

    /// 未完了数を1減らす
    ///
    /// 既に0の場合は`CountUnderflow`（カウンタは0のまま）
    pub fn release_one(&self) -> CoordinationResult<()> {
        match self
            .outstanding
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
        {
            Ok(1) => {
                self.zero.notify_waiters();
                Ok(())
            }
            Ok(_) => Ok(()),
            Err(_) => {
                self.underflowed.store(true, Ordering::Release);
                Err(CoordinationError::count_underflow(self.initial))
            }
        }
    }

    /// 未完了数が0になるまで待機（無期限）
    pub async fn wait(&self) {
        loop {
            let notified = self.zero.notified();
            tokio::pin!(notified);
            // 判定前に登録しておき、判定直後の解放を取りこぼさない
            notified.as_mut().enable();

            if self.is_released() {
                return;
            }
            notified.await;
        }
    }

    /// 期限付き待機
    pub async fn wait_timeout(&self, timeout: Duration) -> CoordinationResult<()> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| {
                CoordinationError::barrier_timeout(timeout.as_millis() as u64, self.outstanding())
            })
    }

    /// 全Producerが完了済みかどうか
    pub fn is_released(&self) -> bool {
        self.outstanding.load(Ordering::Acquire) == 0
    }

    /// アンダーフローが一度でも発生したかどうか
    pub fn has_underflowed(&self) -> bool {
        self.underflowed.load(Ordering::Acquire)
    }

    /// 初期化時のProducer数
    pub fn initial(&self) -> usize {
        self.initial
    }

    pub(crate) fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    /// スコープ終了時に必ず1回解放するガードを取得
    pub fn guard(self: &Arc<Self>) -> ReleaseGuard {
        ReleaseGuard {
            barrier: Arc::clone(self),
            released: false,
        }
    }
}

/// Drop時にバリアを1回だけ解放するガード
///
/// 早期リターンやpanicの経路でも解放が実行される。
#[derive(Debug)]
pub struct ReleaseGuard {
    barrier: BarrierHandle,
    released: bool,
}

impl ReleaseGuard {
    /// 明示的に解放し、アンダーフローを呼び出し側に返す
    pub fn release(mut self) -> CoordinationResult<()> {
        self.released = true;
        self.barrier.release_one()
    }
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(error) = self.barrier.release_one() {
            tracing::error!(%error, "barrier release failed during drop");
        }
    }
}
