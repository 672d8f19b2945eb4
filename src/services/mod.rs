// サービス層 - 機能別の具象実装
// 設定・Sink・ワークユニットをそれぞれ疎結合に提供する

pub mod config;
pub mod sinks;
pub mod work_units;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::DefaultEpisodeConfig;
pub use sinks::{ConsoleSink, JsonLinesSink, MemorySink, NoOpSink, TracingSink};
pub use work_units::{
    EulerProblem, FailingWorkUnit, NumberSeries, Person, PersonJson, ReadFile, StringAnalysis,
    TimeReport, WriteFile,
};
