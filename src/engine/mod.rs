// エンジン層 - 並行処理とオーケストレーション
// チャンネル・バリア・Producer・Collectorを組み合わせてエピソードを実行する

pub mod api;
pub mod barrier;
pub mod channel;
pub mod collector;
pub mod coordinator;
pub mod producer;

// 公開API - 主要コンポーネント
pub use api::{create_default_coordinator, create_quiet_coordinator, run_episode};
pub use barrier::{Barrier, BarrierHandle, ReleaseGuard};
pub use channel::{message_channel, ChannelCloser, MessageReceiver, MessageSender};
pub use collector::{run_collector, spawn_collector};
pub use coordinator::{Coordinator, WorkItem};
pub use producer::{run_producer, spawn_producer, Emitter};
