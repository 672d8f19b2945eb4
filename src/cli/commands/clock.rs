use super::CliApp;
use crate::core::EpisodeSummary;
use crate::engine::WorkItem;
use crate::services::TimeReport;
use anyhow::Result;

/// 現在時刻を1 Producer、解析対象ごとに1 Producer
pub fn time_work(inputs: &[String]) -> Vec<WorkItem> {
    std::iter::once(WorkItem::new("now", TimeReport::now()))
        .chain(
            inputs
                .iter()
                .enumerate()
                .map(|(i, input)| WorkItem::new(format!("parse-{i}"), TimeReport::parse(input))),
        )
        .collect()
}

/// 時刻表示と解析のエピソードを実行
pub async fn execute_time(app: &CliApp, inputs: Vec<String>) -> Result<EpisodeSummary> {
    let summary = app.run(time_work(&inputs)).await?;
    Ok(summary)
}
