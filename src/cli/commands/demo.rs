use super::{numbers_work, strings_work, CliApp};
use crate::core::EpisodeSummary;
use anyhow::Result;

/// 数値進捗と文字列解析の2エピソードを順に実行
///
/// エピソードごとにチャンネルとバリアは新しく確保される
pub async fn execute_demo(app: &CliApp, interval_ms: u64) -> Result<Vec<EpisodeSummary>> {
    let labels = vec!["Goroutine 1".to_string(), "Goroutine 2".to_string()];
    let words = vec!["racecar".to_string(), "hello".to_string()];

    let numbers = app.run(numbers_work(&labels, 5, interval_ms)).await?;
    let strings = app.run(strings_work(&words)).await?;

    Ok(vec![numbers, strings])
}
