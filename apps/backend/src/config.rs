//! Environment configuration.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use bahasa_core::StudySettings;

/// Server configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub settings: StudySettings,
    /// Extra roots, one per line.
    pub dictionary_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = StudySettings::default();
        let settings = StudySettings {
            pass_threshold: parse_or(&get, "BAHASA_PASS_THRESHOLD", defaults.pass_threshold)?,
            mastery_consecutive: parse_or(
                &get,
                "BAHASA_MASTERY_CONSECUTIVE",
                defaults.mastery_consecutive,
            )?,
            mastery_accuracy: parse_or(&get, "BAHASA_MASTERY_ACCURACY", defaults.mastery_accuracy)?,
            mastery_min_attempts: parse_or(
                &get,
                "BAHASA_MASTERY_MIN_ATTEMPTS",
                defaults.mastery_min_attempts,
            )?,
            accuracy_window: parse_or(&get, "BAHASA_ACCURACY_WINDOW", defaults.accuracy_window)?,
            ..defaults
        };
        settings.validate()?;

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&get, "PORT", 3000)?,
            settings,
            dictionary_path: get("BAHASA_DICTIONARY_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", key, raw)),
        None => Ok(default),
    }
}
