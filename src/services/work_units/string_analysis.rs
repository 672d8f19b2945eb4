// 文字列解析レポーター

use crate::core::{Emit, WorkUnit};
use async_trait::async_trait;

/// 文字列を反転（Unicodeスカラー値単位）
pub fn reverse_string(s: &str) -> String {
    s.chars().rev().collect()
}

/// 回文判定
pub fn is_palindrome(s: &str) -> bool {
    s.chars().eq(s.chars().rev())
}

/// 反転と回文判定の結果を1件発行するワークユニット
#[derive(Debug, Clone)]
pub struct StringAnalysis {
    input: String,
}

impl StringAnalysis {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// 発行される結果文字列
    pub fn describe(&self) -> String {
        format!(
            "Original: {}, Reversed: {}, IsPalindrome: {}",
            self.input,
            reverse_string(&self.input),
            is_palindrome(&self.input)
        )
    }
}

#[async_trait]
impl WorkUnit for StringAnalysis {
    async fn run(&self, emitter: &mut dyn Emit) -> anyhow::Result<()> {
        emitter.emit(self.describe()).await
    }
}
