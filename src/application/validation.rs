//! Field-level validation of update payloads
//!
//! Rules only apply to fields that are present in a payload. Failures are
//! collected per field (keyed by the JSON field name) so the admin portal can
//! show every problem at once.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::application::dto::{ChatSettingsPatch, GlobalSettingsPatch};

/// "HH:MM", 24-hour clock with leading zeros
static TIME_OF_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("time of day regex"));

pub const MAX_LLM_MODEL_LEN: usize = 200;
pub const MAX_JOKE_TOPIC_LEN: usize = 512;

/// Per-field validation failures, serialized as `{field: [messages]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

fn require_text(errors: &mut ValidationErrors, field: &str, value: Option<&str>) {
    if let Some(value) = value {
        if value.trim().is_empty() {
            errors.add(field, format!("'{}' must not be empty.", field));
        }
    }
}

fn max_chars(errors: &mut ValidationErrors, field: &str, value: Option<&str>, max: usize) {
    if let Some(value) = value {
        let len = value.chars().count();
        if len > max {
            errors.add(
                field,
                format!(
                    "'{}' must be {} characters or fewer. You entered {} characters.",
                    field, max, len
                ),
            );
        }
    }
}

impl Validate for GlobalSettingsPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        require_text(&mut errors, "llmModel", self.llm_model.as_deref());
        max_chars(&mut errors, "llmModel", self.llm_model.as_deref(), MAX_LLM_MODEL_LEN);

        if let Some(len) = self.history_max_len {
            if len <= 0 {
                errors.add("historyMaxLen", "'historyMaxLen' must be greater than 0.");
            }
        }

        if let Some(probability) = self.stupid_check {
            if !(0.0..=1.0).contains(&probability) {
                errors.add(
                    "stupidCheck",
                    format!(
                        "'stupidCheck' must be between 0 and 1. You entered {}.",
                        probability
                    ),
                );
            }
        }

        if let Some(time) = self.daily_jokes_time.as_deref() {
            if !TIME_OF_DAY_RE.is_match(time) {
                errors.add(
                    "dailyJokesTime",
                    "'dailyJokesTime' must be a time of day in HH:MM format.",
                );
            }
        }

        require_text(&mut errors, "aiInstructions", self.ai_instructions.as_deref());
        require_text(
            &mut errors,
            "stupidityInstructions",
            self.stupidity_instructions.as_deref(),
        );
        require_text(&mut errors, "jokeInstructions", self.joke_instructions.as_deref());

        errors.into_result()
    }
}

impl Validate for ChatSettingsPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        max_chars(&mut errors, "jokeTopic", self.joke_topic.as_deref(), MAX_JOKE_TOPIC_LEN);
        errors.into_result()
    }
}
