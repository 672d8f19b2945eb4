// Sinkサービス - メッセージの表示・記録先

pub mod implementations;

pub use implementations::{ConsoleSink, JsonLinesSink, MemorySink, NoOpSink, TracingSink};
