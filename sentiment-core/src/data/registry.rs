//! Registry of upstream models that write reason/score column pairs.
//!
//! Known models carry a display nickname and a full attribution line.
//! Models that appear in a file but are not registered are still picked
//! up by [`ModelRegistry::discover`], using the key as their name.

use super::adapter::parse_number;
use super::raw::Headers;
use crate::domain::ModelVerdict;
use csv::StringRecord;
use serde::{Deserialize, Serialize};

pub const DEFAULT_REASON_PREFIX: &str = "Invest_Reason_";
pub const DEFAULT_SCORE_PREFIX: &str = "Invest_Score_";

/// Display metadata for one model key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub key: String,
    pub nickname: String,
    pub full_name: String,
}

impl ModelInfo {
    pub fn new(key: &str, nickname: &str, full_name: &str) -> Self {
        Self {
            key: key.to_string(),
            nickname: nickname.to_string(),
            full_name: full_name.to_string(),
        }
    }

    /// Fallback for a key found in a file but absent from the registry.
    pub fn unregistered(key: &str) -> Self {
        Self {
            key: key.to_string(),
            nickname: key.to_string(),
            full_name: format!("Suggested by {key}"),
        }
    }
}

/// Reason/score columns for one model, resolved against a header.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelColumns {
    pub key: String,
    reason_index: usize,
    score_index: Option<usize>,
}

impl ModelColumns {
    /// Extract this model's verdict from a row.
    ///
    /// Blank or `nan` reasons become `None`; a missing or unparseable
    /// score becomes 0.0.
    pub fn verdict(&self, row: &StringRecord) -> ModelVerdict {
        let reason = row
            .get(self.reason_index)
            .map(str::trim)
            .filter(|r| !r.is_empty() && !r.eq_ignore_ascii_case("nan"))
            .map(String::from);
        let score = self
            .score_index
            .and_then(|i| row.get(i))
            .and_then(parse_number)
            .unwrap_or(0.0);

        ModelVerdict {
            model_key: self.key.clone(),
            reason,
            score,
        }
    }
}

/// Known models plus the column naming templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRegistry {
    pub reason_prefix: String,
    pub score_prefix: String,
    pub models: Vec<ModelInfo>,
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self {
            reason_prefix: DEFAULT_REASON_PREFIX.to_string(),
            score_prefix: DEFAULT_SCORE_PREFIX.to_string(),
            models: vec![
                ModelInfo::new("Qwen", "Qweny", "Suggested by Qwen/Qwen2.5-14B-Instruct"),
                ModelInfo::new(
                    "Llama",
                    "Llamy",
                    "Suggested by meta-llama/Meta-Llama-3.1-8B-Instruct",
                ),
                ModelInfo::new("Gemma", "Gemmy", "Suggested by google/gemma-3-12b-it"),
                ModelInfo::new("DeepSeek", "DeepSeeker", "Suggested by deepseek-ai/DeepSeek-R1"),
                ModelInfo::new(
                    "Mistral",
                    "Misty Wind",
                    "Suggested by mistralai/Mistral-7B-Instruct-v0.3",
                ),
            ],
        }
    }
}

impl ModelRegistry {
    /// Register a model, replacing any entry with the same key.
    pub fn register(&mut self, info: ModelInfo) {
        match self.models.iter_mut().find(|m| m.key == info.key) {
            Some(existing) => *existing = info,
            None => self.models.push(info),
        }
    }

    /// Metadata for a key, falling back to [`ModelInfo::unregistered`].
    pub fn info(&self, key: &str) -> ModelInfo {
        self.models
            .iter()
            .find(|m| m.key == key)
            .cloned()
            .unwrap_or_else(|| ModelInfo::unregistered(key))
    }

    pub fn reason_column(&self, key: &str) -> String {
        format!("{}{key}", self.reason_prefix)
    }

    pub fn score_column(&self, key: &str) -> String {
        format!("{}{key}", self.score_prefix)
    }

    /// Scan a header for reason columns, in file order.
    ///
    /// A model is present when its reason column exists; the score column
    /// is optional.
    pub fn discover(&self, headers: &Headers) -> Vec<ModelColumns> {
        headers
            .names()
            .iter()
            .enumerate()
            .filter_map(|(reason_index, name)| {
                let key = name.strip_prefix(self.reason_prefix.as_str())?;
                if key.is_empty() {
                    return None;
                }
                Some(ModelColumns {
                    key: key.to_string(),
                    reason_index,
                    score_index: headers.position(&self.score_column(key)),
                })
            })
            .collect()
    }
}
