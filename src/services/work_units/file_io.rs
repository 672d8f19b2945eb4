// ファイル読み書きのワークユニット

use crate::core::{Emit, WorkUnit};
use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// ファイル全体を読み込み、内容を1件として発行する
///
/// ファイルが存在しない場合はワークユニット失敗となる
#[derive(Debug, Clone)]
pub struct ReadFile {
    path: PathBuf,
}

impl ReadFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl WorkUnit for ReadFile {
    async fn run(&self, emitter: &mut dyn Emit) -> anyhow::Result<()> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;

        emitter.emit(format!("File content: {content}")).await
    }
}

/// 内容をファイルへ書き込み、完了を発行する（既存ファイルは上書き）
#[derive(Debug, Clone)]
pub struct WriteFile {
    path: PathBuf,
    content: String,
}

impl WriteFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl WorkUnit for WriteFile {
    async fn run(&self, emitter: &mut dyn Emit) -> anyhow::Result<()> {
        tokio::fs::write(&self.path, self.content.as_bytes())
            .await
            .with_context(|| format!("failed to write {}", self.path.display()))?;

        emitter
            .emit(format!("Content written to {}", self.path.display()))
            .await
    }
}
