//! The fixed set of GPT models h is allowed to query.

use crate::error::{Error, Result};

/// Model used when `--model` is not given.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Every model name accepted by `--model`.
pub const VALID_MODELS: [&str; 6] = [
    "gpt-4",
    "gpt-4-0314",
    "gpt-4-32k",
    "gpt-4-32k-0314",
    "gpt-3.5-turbo",
    "gpt-3.5-turbo-0301",
];

/// Check a requested model name against the allow-list.
pub fn validate_model(model: &str) -> Result<&str> {
    if VALID_MODELS.contains(&model) {
        return Ok(model);
    }

    let choices = VALID_MODELS
        .iter()
        .map(|m| format!("  {}", m))
        .collect::<Vec<_>>()
        .join("\n");

    Err(Error::UnknownModel {
        model: model.to_string(),
        choices,
    })
}
