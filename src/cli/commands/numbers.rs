use super::CliApp;
use crate::core::EpisodeSummary;
use crate::engine::WorkItem;
use crate::services::NumberSeries;
use anyhow::Result;
use std::time::Duration;

/// ラベルごとに数値系列Producerを作成
pub fn numbers_work(labels: &[String], count: u64, interval_ms: u64) -> Vec<WorkItem> {
    labels
        .iter()
        .map(|label| {
            let series = NumberSeries::new(label.clone(), count)
                .with_interval(Duration::from_millis(interval_ms));
            WorkItem::new(label.clone(), series)
        })
        .collect()
}

/// 数値進捗レポートのエピソードを実行
pub async fn execute_numbers(
    app: &CliApp,
    labels: Vec<String>,
    count: u64,
    interval_ms: u64,
) -> Result<EpisodeSummary> {
    if labels.is_empty() {
        anyhow::bail!("at least one producer label is required");
    }

    let summary = app.run(numbers_work(&labels, count, interval_ms)).await?;
    Ok(summary)
}
