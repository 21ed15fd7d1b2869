use std::{fs, io::ErrorKind, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "sortvis.toml";
pub const MIN_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub speed: u32,
    pub base_delay_ms: u64,
    pub max_array_size: usize,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed: 5,
            base_delay_ms: 500,
            max_array_size: 200,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    speed: Option<u32>,
    base_delay_ms: Option<u64>,
    max_array_size: Option<usize>,
    log_filter: Option<String>,
}

/// Defaults, then the config file, then environment overrides.
///
/// A missing file is only an error when its path was given explicitly.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = config_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    match fs::read_to_string(path) {
        Ok(raw) => settings
            .apply_file(&raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound && config_path.is_none() => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    }

    settings.apply_env(|key| std::env::var(key).ok());
    Ok(settings)
}

impl Settings {
    fn apply_file(&mut self, raw: &str) -> anyhow::Result<()> {
        let file: FileSettings = toml::from_str(raw)?;
        if let Some(v) = file.speed {
            self.speed = v;
        }
        if let Some(v) = file.base_delay_ms {
            self.base_delay_ms = v;
        }
        if let Some(v) = file.max_array_size {
            self.max_array_size = v;
        }
        if let Some(v) = file.log_filter {
            self.log_filter = v;
        }
        Ok(())
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env_override(&lookup, "SORTVIS_SPEED", "APP__SPEED") {
            if let Ok(parsed) = v.parse::<u32>() {
                self.speed = parsed;
            }
        }
        if let Some(v) = env_override(&lookup, "SORTVIS_BASE_DELAY_MS", "APP__BASE_DELAY_MS") {
            if let Ok(parsed) = v.parse::<u64>() {
                self.base_delay_ms = parsed;
            }
        }
        if let Some(v) = env_override(&lookup, "SORTVIS_MAX_ARRAY_SIZE", "APP__MAX_ARRAY_SIZE") {
            if let Ok(parsed) = v.parse::<usize>() {
                self.max_array_size = parsed;
            }
        }
        if let Some(v) = env_override(&lookup, "SORTVIS_LOG", "APP__LOG") {
            self.log_filter = v;
        }
    }

    /// Per-step delay for a speed level. Levels are clamped into
    /// `MIN_SPEED..=MAX_SPEED`; higher is faster.
    pub fn delay_for_speed(&self, speed: u32) -> Duration {
        let speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        Duration::from_millis(self.base_delay_ms / u64::from(speed))
    }

    pub fn delay(&self) -> Duration {
        self.delay_for_speed(self.speed)
    }
}

// `APP__` names take precedence over the short ones.
fn env_override(
    lookup: &impl Fn(&str) -> Option<String>,
    short: &str,
    app: &str,
) -> Option<String> {
    lookup(app).or_else(|| lookup(short))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
