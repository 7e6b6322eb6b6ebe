use crate::error::{Result, StudyError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_RUN_DELAY_MS: u64 = 800;
const DEFAULT_INDENT_WIDTH: usize = 4;
const DEFAULT_START_TOPIC: &str = "basics/project";
const DEFAULT_PEEK_LINES: usize = 3;
pub const MAX_INDENT_WIDTH: usize = 16;
pub const MAX_PEEK_LINES: usize = 50;

/// Keys accepted by `gostudy config`, in display order.
pub const CONFIG_KEYS: &[&str] = &[
    "run-delay-ms",
    "indent-width",
    "start-topic",
    "peek-lines",
    "catalogue-path",
];

/// Configuration for gostudy, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudyConfig {
    /// How long a simulated run shows its placeholder
    #[serde(default = "default_run_delay_ms")]
    pub run_delay_ms: u64,

    /// Spaces per level when formatting the buffer
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    /// Topic selected when a session starts (`category/topic` or sidebar number)
    #[serde(default = "default_start_topic")]
    pub start_topic: String,

    /// Lines kept at each end of a snippet in `list --peek`
    #[serde(default = "default_peek_lines")]
    pub peek_lines: usize,

    /// Custom catalogue JSON; the built-in Go catalogue when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalogue_path: Option<PathBuf>,
}

fn default_run_delay_ms() -> u64 {
    DEFAULT_RUN_DELAY_MS
}

fn default_indent_width() -> usize {
    DEFAULT_INDENT_WIDTH
}

fn default_start_topic() -> String {
    DEFAULT_START_TOPIC.to_string()
}

fn default_peek_lines() -> usize {
    DEFAULT_PEEK_LINES
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            run_delay_ms: DEFAULT_RUN_DELAY_MS,
            indent_width: DEFAULT_INDENT_WIDTH,
            start_topic: default_start_topic(),
            peek_lines: DEFAULT_PEEK_LINES,
            catalogue_path: None,
        }
    }
}

impl StudyConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(StudyError::Io)?;
        let config: StudyConfig =
            serde_json::from_str(&content).map_err(StudyError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(StudyError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(StudyError::Serialization)?;
        fs::write(config_path, content).map_err(StudyError::Io)?;
        Ok(())
    }

    pub fn run_delay(&self) -> Duration {
        Duration::from_millis(self.run_delay_ms)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "run-delay-ms" => self.run_delay_ms.to_string(),
            "indent-width" => self.indent_width.to_string(),
            "start-topic" => self.start_topic.clone(),
            "peek-lines" => self.peek_lines.to_string(),
            "catalogue-path" => self
                .catalogue_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string()),
            other => return Err(unknown_key(other)),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "run-delay-ms" => self.run_delay_ms = parse_number(key, value)?,
            "indent-width" => self.indent_width = parse_at_most(key, value, MAX_INDENT_WIDTH)?,
            "start-topic" => self.start_topic = value.trim().to_string(),
            "peek-lines" => self.peek_lines = parse_at_most(key, value, MAX_PEEK_LINES)?,
            "catalogue-path" => {
                self.catalogue_path = match value.trim() {
                    "" | "builtin" | "built-in" => None,
                    path => Some(PathBuf::from(path)),
                }
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    /// Pulls hand-edited widths back into the range `set` accepts.
    pub fn clamped(mut self) -> Self {
        self.indent_width = self.indent_width.min(MAX_INDENT_WIDTH);
        self.peek_lines = self.peek_lines.min(MAX_PEEK_LINES);
        self
    }

    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|k| self.get(k).ok().map(|v| (*k, v)))
            .collect()
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| StudyError::Config(format!("{} expects a number, got '{}'", key, value)))
}

fn parse_at_most(key: &str, value: &str, max: usize) -> Result<usize> {
    let n: usize = parse_number(key, value)?;
    if n > max {
        return Err(StudyError::Config(format!(
            "{} must be at most {}, got {}",
            key, max, n
        )));
    }
    Ok(n)
}

fn unknown_key(key: &str) -> StudyError {
    StudyError::Config(format!(
        "unknown key '{}' (expected one of: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = StudyConfig::default();
        assert_eq!(config.run_delay_ms, 800);
        assert_eq!(config.indent_width, 4);
        assert_eq!(config.start_topic, "basics/project");
        assert_eq!(config.catalogue_path, None);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let config = StudyConfig::load(temp.path()).unwrap();
        assert_eq!(config, StudyConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested");

        let mut config = StudyConfig::default();
        config.set("run-delay-ms", "50").unwrap();
        config.set("catalogue-path", "/tmp/go.json").unwrap();
        config.save(&dir).unwrap();

        let loaded = StudyConfig::load(&dir).unwrap();
        assert_eq!(loaded.run_delay(), Duration::from_millis(50));
        assert_eq!(loaded.catalogue_path, Some(PathBuf::from("/tmp/go.json")));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILENAME), r#"{"indent_width": 2}"#).unwrap();
        let config = StudyConfig::load(temp.path()).unwrap();
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.run_delay_ms, 800);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = StudyConfig::default();
        assert!(matches!(
            config.set("run-delay-ms", "soon"),
            Err(StudyError::Config(_))
        ));
        assert!(matches!(
            config.set("colour", "blue"),
            Err(StudyError::Config(_))
        ));
        assert_eq!(config, StudyConfig::default());
    }

    #[test]
    fn test_set_rejects_oversized_widths() {
        let mut config = StudyConfig::default();
        assert!(matches!(
            config.set("indent-width", &usize::MAX.to_string()),
            Err(StudyError::Config(_))
        ));
        assert!(matches!(
            config.set("peek-lines", "51"),
            Err(StudyError::Config(_))
        ));
        assert_eq!(config, StudyConfig::default());

        config.set("indent-width", "16").unwrap();
        config.set("peek-lines", "50").unwrap();
        assert_eq!(config.indent_width, MAX_INDENT_WIDTH);
        assert_eq!(config.peek_lines, MAX_PEEK_LINES);
    }

    #[test]
    fn test_clamped_limits_hand_edited_values() {
        let temp = TempDir::new().unwrap();
        let json = format!(
            r#"{{"indent_width": {}, "peek_lines": 1000}}"#,
            usize::MAX
        );
        fs::write(temp.path().join(CONFIG_FILENAME), json).unwrap();
        let config = StudyConfig::load(temp.path()).unwrap().clamped();
        assert_eq!(config.indent_width, MAX_INDENT_WIDTH);
        assert_eq!(config.peek_lines, MAX_PEEK_LINES);
    }

    #[test]
    fn test_catalogue_path_reset() {
        let mut config = StudyConfig::default();
        config.set("catalogue-path", "x.json").unwrap();
        config.set("catalogue-path", "builtin").unwrap();
        assert_eq!(config.get("catalogue-path").unwrap(), "(built-in)");
    }

    #[test]
    fn test_list_all_covers_every_key() {
        let all = StudyConfig::default().list_all();
        let keys: Vec<&str> = all.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, CONFIG_KEYS);
    }
}
