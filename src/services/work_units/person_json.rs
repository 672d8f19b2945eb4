// JSONエンコード/デコードの往復

use crate::core::{Emit, WorkUnit};
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
}

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, age: u32) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone)]
enum Source {
    Person(Person),
    Json(String),
}

/// Personをエンコードして再デコードし、両方の結果を発行するワークユニット
///
/// 入力JSONが不正な場合はワークユニット失敗となる
#[derive(Debug, Clone)]
pub struct PersonJson {
    source: Source,
}

impl PersonJson {
    pub fn encode(person: Person) -> Self {
        Self {
            source: Source::Person(person),
        }
    }

    pub fn decode(json: impl Into<String>) -> Self {
        Self {
            source: Source::Json(json.into()),
        }
    }
}

#[async_trait]
impl WorkUnit for PersonJson {
    async fn run(&self, emitter: &mut dyn Emit) -> anyhow::Result<()> {
        let person = match &self.source {
            Source::Person(person) => person.clone(),
            Source::Json(json) => {
                serde_json::from_str::<Person>(json).context("failed to decode person JSON")?
            }
        };

        let encoded = serde_json::to_string(&person).context("failed to encode person")?;
        emitter.emit(format!("JSON: {encoded}")).await?;

        let decoded: Person =
            serde_json::from_str(&encoded).context("failed to decode person JSON")?;
        emitter
            .emit(format!(
                "Decoded Person: {}, Age: {}",
                decoded.full_name(),
                decoded.age
            ))
            .await
    }
}
