//! Study configuration consumed from the host.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::types::MatchingMode;

/// Global study settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySettings {
    /// Minimum similarity for a typed answer to pass.
    pub pass_threshold: f64,
    pub matching_mode: MatchingMode,
    /// Consecutive passes that make an item mastered.
    pub mastery_consecutive: u32,
    /// Rolling accuracy that makes an item mastered.
    pub mastery_accuracy: f64,
    /// Answers required before the accuracy rule can master an item.
    pub mastery_min_attempts: u32,
    /// Number of recent outcomes kept for the rolling accuracy.
    pub accuracy_window: usize,
    pub distractor_count: usize,
    /// Minimum orthographic similarity of a distractor to the correct answer.
    pub distractor_min_similarity: f64,
    /// Items per day used by recommendations.
    pub daily_goal: usize,
}

impl Default for StudySettings {
    fn default() -> Self {
        Self {
            pass_threshold: 0.85,
            matching_mode: MatchingMode::default(),
            mastery_consecutive: 3,
            mastery_accuracy: 0.8,
            mastery_min_attempts: 5,
            accuracy_window: 10,
            distractor_count: 3,
            distractor_min_similarity: 0.2,
            daily_goal: 20,
        }
    }
}

impl StudySettings {
    /// Reject out-of-range values at the boundary.
    pub fn validate(&self) -> Result<()> {
        check_unit("pass_threshold", self.pass_threshold)?;
        check_unit("mastery_accuracy", self.mastery_accuracy)?;
        check_unit("distractor_min_similarity", self.distractor_min_similarity)?;
        if self.mastery_consecutive == 0 {
            return Err(CoreError::InvalidConfig {
                field: "mastery_consecutive",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.mastery_min_attempts == 0 {
            return Err(CoreError::InvalidConfig {
                field: "mastery_min_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.accuracy_window == 0 {
            return Err(CoreError::InvalidConfig {
                field: "accuracy_window",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Apply partial overrides on top of these settings.
    pub fn merge(&self, overrides: Option<&SettingsOverride>) -> Self {
        match overrides {
            Some(o) => Self {
                pass_threshold: o.pass_threshold.unwrap_or(self.pass_threshold),
                matching_mode: o.matching_mode.unwrap_or(self.matching_mode),
                mastery_consecutive: o.mastery_consecutive.unwrap_or(self.mastery_consecutive),
                mastery_accuracy: o.mastery_accuracy.unwrap_or(self.mastery_accuracy),
                mastery_min_attempts: o.mastery_min_attempts.unwrap_or(self.mastery_min_attempts),
                accuracy_window: o.accuracy_window.unwrap_or(self.accuracy_window),
                distractor_count: o.distractor_count.unwrap_or(self.distractor_count),
                distractor_min_similarity: o
                    .distractor_min_similarity
                    .unwrap_or(self.distractor_min_similarity),
                daily_goal: o.daily_goal.unwrap_or(self.daily_goal),
            },
            None => self.clone(),
        }
    }
}

fn check_unit(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::InvalidConfig {
            field,
            reason: format!("{} is outside 0.0..=1.0", value),
        })
    }
}

/// Partial settings (all fields optional for overrides).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_mode: Option<MatchingMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastery_consecutive: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastery_accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastery_min_attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_window: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distractor_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distractor_min_similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_goal: Option<usize>,
}
