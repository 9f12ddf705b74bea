//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into services, so request
//! handling never reads process-wide environment variables.

use crate::constants::MAX_SUGGESTION_COUNT;
use crate::suggestions::DEFAULT_SUGGESTION_COUNT;
use crate::{PatientError, PatientResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    suggestion_count: usize,
    seed_sample_data: bool,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::InvalidInput` if `suggestion_count` is zero or above
    /// [`MAX_SUGGESTION_COUNT`].
    pub fn new(suggestion_count: usize, seed_sample_data: bool) -> PatientResult<Self> {
        if suggestion_count == 0 {
            return Err(PatientError::InvalidInput(
                "suggestion count must be at least 1".into(),
            ));
        }
        if suggestion_count > MAX_SUGGESTION_COUNT {
            return Err(PatientError::InvalidInput(format!(
                "suggestion count exceeds maximum of {}",
                MAX_SUGGESTION_COUNT
            )));
        }

        Ok(Self {
            suggestion_count,
            seed_sample_data,
        })
    }

    pub fn suggestion_count(&self) -> usize {
        self.suggestion_count
    }

    pub fn seed_sample_data(&self) -> bool {
        self.seed_sample_data
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            suggestion_count: DEFAULT_SUGGESTION_COUNT,
            seed_sample_data: true,
        }
    }
}

/// Parse the suggestion count from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_SUGGESTION_COUNT`].
pub fn suggestion_count_from_env_value(value: Option<String>) -> PatientResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value
        .map(|v| {
            v.parse::<usize>().map_err(|_| {
                PatientError::InvalidInput(format!("suggestion count is not a number: {v}"))
            })
        })
        .transpose()?;

    Ok(parsed.unwrap_or(DEFAULT_SUGGESTION_COUNT))
}

/// Parse the sample-data flag from an optional string value.
///
/// Accepts `true/false`, `yes/no`, `on/off` and `1/0`, ignoring case. Missing or blank values
/// default to `true`.
pub fn seed_flag_from_env_value(value: Option<String>) -> PatientResult<bool> {
    let Some(value) = value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty())
    else {
        return Ok(true);
    };

    match value.as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(PatientError::InvalidInput(format!(
            "sample data flag must be a boolean, got: {other}"
        ))),
    }
}

/// Resolve a `CoreConfig` from raw environment values.
///
/// Callers read the environment (see [`crate::constants`]) and pass the values in, which keeps
/// this function testable without touching process state.
pub fn core_config_from_env_values(
    suggestion_count: Option<String>,
    seed_sample_data: Option<String>,
) -> PatientResult<CoreConfig> {
    CoreConfig::new(
        suggestion_count_from_env_value(suggestion_count)?,
        seed_flag_from_env_value(seed_sample_data)?,
    )
}
