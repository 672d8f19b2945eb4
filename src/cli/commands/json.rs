use super::CliApp;
use crate::core::EpisodeSummary;
use crate::engine::WorkItem;
use crate::services::{Person, PersonJson};
use anyhow::Result;

/// 入力がない場合はJohn Doeをエンコードする
pub fn json_work(inputs: &[String]) -> Vec<WorkItem> {
    if inputs.is_empty() {
        return vec![WorkItem::new(
            "person",
            PersonJson::encode(Person::new("John", "Doe", 30)),
        )];
    }

    inputs
        .iter()
        .enumerate()
        .map(|(i, json)| WorkItem::new(format!("json-{i}"), PersonJson::decode(json.clone())))
        .collect()
}

/// JSONエンコード/デコードのエピソードを実行
pub async fn execute_json(app: &CliApp, inputs: Vec<String>) -> Result<EpisodeSummary> {
    let summary = app.run(json_work(&inputs)).await?;
    Ok(summary)
}
