use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudyError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown topic: {category}/{topic}")]
    UnknownTopic { category: String, topic: String },

    #[error("Invalid topic selector: {0}")]
    InvalidSelector(String),

    #[error("Catalogue error: {0}")]
    Catalogue(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StudyError>;
