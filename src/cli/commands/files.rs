use super::CliApp;
use crate::core::EpisodeSummary;
use crate::engine::WorkItem;
use crate::services::{ReadFile, WriteFile};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// 読み込みごとに1 Producer、書き込みに1 Producer
pub fn files_work(reads: &[PathBuf], write: &Path, content: &str) -> Vec<WorkItem> {
    reads
        .iter()
        .map(|path| WorkItem::new(format!("read:{}", path.display()), ReadFile::new(path)))
        .chain(std::iter::once(WorkItem::new(
            format!("write:{}", write.display()),
            WriteFile::new(write, content),
        )))
        .collect()
}

/// ファイル読み書きのエピソードを実行
pub async fn execute_files(
    app: &CliApp,
    reads: Vec<PathBuf>,
    write: PathBuf,
    content: String,
) -> Result<EpisodeSummary> {
    let summary = app.run(files_work(&reads, &write, &content)).await?;
    Ok(summary)
}
