use crate::error::StudyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicContent {
    pub overview: String,
    pub key_points: Vec<String>,
    /// Example snippet seeded into the buffer on selection
    pub code: String,
    /// Pre-authored text revealed by a simulated run
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub title: String,
    pub description: String,
    pub level: Level,
    pub content: TopicContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
    pub icon: String,
    pub topics: indexmap::IndexMap<String, Topic>,
}

/// A `category/topic` key pair. Holding one says nothing about whether the
/// pair exists; only the catalogue can vouch for that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicRef {
    pub category: String,
    pub topic: String,
}

impl TopicRef {
    pub fn new(category: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            topic: topic.into(),
        }
    }
}

impl fmt::Display for TopicRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.topic)
    }
}

impl FromStr for TopicRef {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((category, topic))
                if !category.is_empty() && !topic.is_empty() && !topic.contains('/') =>
            {
                Ok(TopicRef::new(category, topic))
            }
            _ => Err(StudyError::InvalidSelector(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_topic_ref() {
        let r: TopicRef = "basics/project".parse().unwrap();
        assert_eq!(r, TopicRef::new("basics", "project"));
        assert_eq!(r.to_string(), "basics/project");
    }

    #[test]
    fn rejects_malformed_topic_ref() {
        for bad in ["basics", "/project", "basics/", "a/b/c", ""] {
            assert!(bad.parse::<TopicRef>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn topic_content_uses_camel_case_keys() {
        let json = r#"{"overview":"o","keyPoints":["k"],"code":"c","output":"x"}"#;
        let content: TopicContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.key_points, vec!["k".to_string()]);
    }

    #[test]
    fn level_round_trips_through_json() {
        let level: Level = serde_json::from_str("\"Intermediate\"").unwrap();
        assert_eq!(level, Level::Intermediate);
        assert_eq!(level.to_string(), "Intermediate");
    }
}
