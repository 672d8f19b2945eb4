use super::CliApp;
use crate::core::EpisodeSummary;
use crate::engine::WorkItem;
use crate::services::StringAnalysis;
use anyhow::Result;

pub fn strings_work(words: &[String]) -> Vec<WorkItem> {
    words
        .iter()
        .map(|word| WorkItem::new(word.clone(), StringAnalysis::new(word.clone())))
        .collect()
}

/// 文字列解析レポートのエピソードを実行
pub async fn execute_strings(app: &CliApp, words: Vec<String>) -> Result<EpisodeSummary> {
    let summary = app.run(strings_work(&words)).await?;
    Ok(summary)
}
