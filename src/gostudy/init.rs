use crate::api::{CmdMessage, StudyApi};
use crate::catalogue::Catalogue;
use crate::config::StudyConfig;
use crate::error::Result;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Overrides the config directory (used by tests and portable setups).
pub const HOME_ENV: &str = "GOSTUDY_HOME";

pub struct StudyContext {
    pub api: StudyApi,
    pub config: StudyConfig,
    /// Problems that were worked around while starting up
    pub messages: Vec<CmdMessage>,
}

/// Where `config.json` lives: `$GOSTUDY_HOME`, else the platform config directory,
/// else `.gostudy` under `cwd`.
pub fn config_dir(cwd: &Path) -> PathBuf {
    if let Ok(home) = std::env::var(HOME_ENV) {
        if !home.trim().is_empty() {
            return PathBuf::from(home);
        }
    }
    ProjectDirs::from("com", "gostudy", "gostudy")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| cwd.join(".gostudy"))
}

pub fn initialize(config_dir: &Path) -> Result<StudyContext> {
    let mut messages = Vec::new();

    let config = match StudyConfig::load(config_dir) {
        Ok(config) => config.clamped(),
        Err(e) => {
            warn!(error = %e, "unreadable config, using defaults");
            messages.push(CmdMessage::warning(format!(
                "Ignoring unreadable config ({}); using defaults.",
                e
            )));
            StudyConfig::default()
        }
    };

    let catalogue = match &config.catalogue_path {
        Some(path) => {
            // Relative paths are taken from the config directory.
            let path = config_dir.join(path);
            debug!(path = %path.display(), "loading custom catalogue");
            Catalogue::load(&path)?
        }
        None => Catalogue::builtin()?,
    };
    debug!(
        categories = catalogue.category_count(),
        topics = catalogue.topic_count(),
        "catalogue loaded"
    );

    let mut api = StudyApi::new(catalogue)?
        .with_run_delay(config.run_delay())
        .with_indent_width(config.indent_width);

    if let Err(e) = api.select(&config.start_topic) {
        warn!(start_topic = %config.start_topic, error = %e, "start topic unavailable");
        messages.push(CmdMessage::warning(format!(
            "Start topic '{}' not found ({}); starting at {}.",
            config.start_topic,
            e,
            api.selection()
        )));
    }

    Ok(StudyContext {
        api,
        config,
        messages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TopicRef;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_config() {
        let temp = TempDir::new().unwrap();
        let ctx = initialize(temp.path()).unwrap();
        assert_eq!(ctx.api.selection(), &TopicRef::new("basics", "project"));
        assert_eq!(ctx.api.run_delay(), Duration::from_millis(800));
        assert!(ctx.messages.is_empty());
    }

    #[test]
    fn honours_start_topic_and_delay() {
        let temp = TempDir::new().unwrap();
        let mut config = StudyConfig::default();
        config.set("start-topic", "3").unwrap();
        config.set("run-delay-ms", "10").unwrap();
        config.save(temp.path()).unwrap();

        let ctx = initialize(temp.path()).unwrap();
        let third = ctx.api.catalogue().entry(3).unwrap().topic_ref();
        assert_eq!(ctx.api.selection(), &third);
        assert_eq!(ctx.api.run_delay(), Duration::from_millis(10));
    }

    #[test]
    fn unknown_start_topic_falls_back_with_warning() {
        let temp = TempDir::new().unwrap();
        let mut config = StudyConfig::default();
        config.set("start-topic", "basics/nowhere").unwrap();
        config.save(temp.path()).unwrap();

        let ctx = initialize(temp.path()).unwrap();
        assert_eq!(ctx.api.selection(), &TopicRef::new("basics", "project"));
        assert_eq!(ctx.messages.len(), 1);
    }

    #[test]
    fn broken_config_falls_back_with_warning() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.json"), "{ not json").unwrap();
        let ctx = initialize(temp.path()).unwrap();
        assert_eq!(ctx.config, StudyConfig::default());
        assert_eq!(ctx.messages.len(), 1);
    }

    #[test]
    fn custom_catalogue_relative_to_config_dir() {
        let temp = TempDir::new().unwrap();
        let json = r#"{"rust": {"title": "Rust", "icon": "R", "topics": {
            "hello": {"title": "Hello", "description": "d", "level": "Beginner",
                      "content": {"overview": "o", "keyPoints": [], "code": "fn main() {}", "output": "hi"}}}}}"#;
        fs::write(temp.path().join("mine.json"), json).unwrap();
        let mut config = StudyConfig::default();
        config.set("catalogue-path", "mine.json").unwrap();
        config.save(temp.path()).unwrap();

        let ctx = initialize(temp.path()).unwrap();
        assert_eq!(ctx.api.catalogue().topic_count(), 1);
        // Default start topic is absent here, so the first topic is used.
        assert_eq!(ctx.api.selection(), &TopicRef::new("rust", "hello"));
        assert_eq!(ctx.messages.len(), 1);
    }

    #[test]
    fn oversized_widths_in_config_file_are_clamped() {
        let temp = TempDir::new().unwrap();
        let json = format!(
            r#"{{"indent_width": {}, "peek_lines": {}}}"#,
            usize::MAX,
            usize::MAX
        );
        fs::write(temp.path().join("config.json"), json).unwrap();

        let mut ctx = initialize(temp.path()).unwrap();
        assert_eq!(ctx.config.peek_lines, crate::config::MAX_PEEK_LINES);
        ctx.api.set_buffer("a{\nb\n}");
        let formatted = ctx.api.format_buffer().buffer.unwrap();
        assert_eq!(formatted, format!("a{{\n{}b\n}}", " ".repeat(16)));
    }

    #[test]
    fn missing_custom_catalogue_is_an_error() {
        let temp = TempDir::new().unwrap();
        let mut config = StudyConfig::default();
        config.set("catalogue-path", "absent.json").unwrap();
        config.save(temp.path()).unwrap();
        assert!(initialize(temp.path()).is_err());
    }
}
