pub mod clock;
pub mod demo;
pub mod euler;
pub mod files;
pub mod json;
pub mod numbers;
pub mod strings;

pub use clock::*;
pub use demo::*;
pub use euler::*;
pub use files::*;
pub use json::*;
pub use numbers::*;
pub use strings::*;

use super::args::{Cli, Commands, OutputFormat};
use crate::core::{CoordinationError, EpisodeSummary, Sink};
use crate::services::{ConsoleSink, DefaultEpisodeConfig, JsonLinesSink, TracingSink};
use crate::App;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// CLIで使用するAppの型
pub type CliApp = App<DefaultEpisodeConfig, dyn Sink>;

/// ログ出力の初期化
///
/// ログは標準エラーへ出力し、標準出力はメッセージ表示専用にする
pub fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fan_in=info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// 引数から設定とSinkを組み立ててAppを作成
pub fn build_app(cli: &Cli) -> Result<CliApp> {
    let config = DefaultEpisodeConfig::new(cli.capacity)
        .with_barrier_timeout(cli.timeout_ms.map(Duration::from_millis));
    config.validate()?;

    let sink: Arc<dyn Sink> = match cli.format {
        OutputFormat::Console => Arc::new(ConsoleSink::new()),
        OutputFormat::Json => Arc::new(JsonLinesSink::stdout()),
        OutputFormat::Log => Arc::new(TracingSink::new()),
    };

    Ok(App::new(config, sink))
}

/// サブコマンドの実行
pub async fn execute(cli: Cli) -> Result<()> {
    let app = build_app(&cli)?;

    let summaries = match cli.command {
        Commands::Numbers {
            labels,
            count,
            interval_ms,
        } => vec![execute_numbers(&app, labels, count, interval_ms).await?],
        Commands::Strings { words } => vec![execute_strings(&app, words).await?],
        Commands::Euler => vec![execute_euler(&app).await?],
        Commands::Json { inputs } => vec![execute_json(&app, inputs).await?],
        Commands::Files {
            reads,
            write,
            content,
        } => vec![execute_files(&app, reads, write, content).await?],
        Commands::Time { inputs } => vec![execute_time(&app, inputs).await?],
        Commands::Demo { interval_ms } => execute_demo(&app, interval_ms).await?,
    };

    if cli.format == OutputFormat::Console {
        for summary in &summaries {
            print_summary(summary);
        }
    } else {
        for summary in &summaries {
            tracing::info!(
                producers = summary.total_producers,
                messages = summary.messages_received,
                failed = summary.failed_producers,
                elapsed_ms = summary.elapsed_ms,
                "episode summary"
            );
        }
    }

    Ok(())
}

/// 終了時に表示する診断メッセージを組み立てる
///
/// 協調処理のエラーには重要度と再実行の可否を付ける
pub fn describe_error(error: &anyhow::Error) -> String {
    let Some(coordination) = error.downcast_ref::<CoordinationError>() else {
        return format!("❌ エラー: {error:#}");
    };

    let mut description = format!(
        "❌ エラー [{}]: {error:#}",
        coordination.severity().as_str()
    );
    if coordination.is_protocol_violation() {
        description.push_str("\n🐛 チャンネルまたはバリアの誤用です");
    } else if coordination.is_recoverable() {
        description.push_str("\n💡 再実行で解決する可能性があります");
    }
    description
}

/// エピソードのサマリーを表示
pub fn print_summary(summary: &EpisodeSummary) {
    println!("\n✅ エピソード完了!");
    println!("📊 処理結果:");
    println!("   - 開始時刻: {}", summary.started_at.to_rfc3339());
    println!("   - Producer数: {}", summary.total_producers);
    println!("   - 受信メッセージ数: {}", summary.messages_received);
    println!("   - 失敗Producer数: {}", summary.failed_producers);
    println!("   - 所要時間: {}ms", summary.elapsed_ms);

    if summary.failed_producers > 0 {
        println!(
            "⚠️  {}個のProducerでエラーが発生しました",
            summary.failed_producers
        );
    }
}
