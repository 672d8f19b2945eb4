use super::CliApp;
use crate::core::EpisodeSummary;
use crate::engine::WorkItem;
use crate::services::EulerProblem;
use anyhow::Result;

pub fn euler_work() -> Vec<WorkItem> {
    EulerProblem::classic_set()
        .into_iter()
        .map(|problem| WorkItem::new(problem.label(), problem))
        .collect()
}

/// 数論問題を並行に解くエピソードを実行
pub async fn execute_euler(app: &CliApp) -> Result<EpisodeSummary> {
    let summary = app.run(euler_work()).await?;
    Ok(summary)
}
