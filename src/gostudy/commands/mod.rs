use crate::config::StudyConfig;
use crate::index::DisplayTopic;
use crate::session::ExecutionDisplay;

pub mod clear;
pub mod config;
pub mod list;
pub mod reindent;
pub mod run;
pub mod search;
pub mod select;
pub mod show;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Sidebar rows (list, search)
    pub listed_topics: Vec<DisplayTopic>,
    /// The topic panel to show (show, select)
    pub topic: Option<DisplayTopic>,
    /// Buffer text after the command (select, format)
    pub buffer: Option<String>,
    /// Output panel after the command (select, run, clear)
    pub display: Option<ExecutionDisplay>,
    pub config: Option<StudyConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_topics(mut self, topics: Vec<DisplayTopic>) -> Self {
        self.listed_topics = topics;
        self
    }

    pub fn with_topic(mut self, topic: DisplayTopic) -> Self {
        self.topic = Some(topic);
        self
    }

    pub fn with_buffer(mut self, buffer: impl Into<String>) -> Self {
        self.buffer = Some(buffer.into());
        self
    }

    pub fn with_display(mut self, display: ExecutionDisplay) -> Self {
        self.display = Some(display);
        self
    }

    pub fn with_config(mut self, config: StudyConfig) -> Self {
        self.config = Some(config);
        self
    }
}
