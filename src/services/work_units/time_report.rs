// 時刻の表示と文字列からの解析

use crate::core::{Emit, WorkUnit};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};

/// 解析する時刻文字列の書式
pub const TIME_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// RFC 1123形式（例: `Thu, 06 Jun 2024 12:00:00 UTC`）
pub const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %Z";

pub fn format_rfc1123(time: &DateTime<Utc>) -> String {
    time.format(RFC1123_FORMAT).to_string()
}

/// `YYYY-MM-DD HH:MM:SS` をUTCの時刻として解析
pub fn parse_time(input: &str) -> anyhow::Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(input, TIME_INPUT_FORMAT)
        .with_context(|| format!("failed to parse time {input:?}"))?;
    Ok(naive.and_utc())
}

#[derive(Debug, Clone)]
enum Source {
    Now,
    Parse(String),
}

/// 現在時刻の表示、または時刻文字列の解析を行うワークユニット
#[derive(Debug, Clone)]
pub struct TimeReport {
    source: Source,
}

impl TimeReport {
    pub fn now() -> Self {
        Self {
            source: Source::Now,
        }
    }

    pub fn parse(input: impl Into<String>) -> Self {
        Self {
            source: Source::Parse(input.into()),
        }
    }
}

#[async_trait]
impl WorkUnit for TimeReport {
    async fn run(&self, emitter: &mut dyn Emit) -> anyhow::Result<()> {
        let payload = match &self.source {
            Source::Now => format!("Current Time: {}", format_rfc1123(&Utc::now())),
            Source::Parse(input) => format!("Parsed Time: {}", parse_time(input)?),
        };
        emitter.emit(payload).await
    }
}
