//! # Topic Catalogue
//!
//! The catalogue is the read-only content source for everything else: categories of Go
//! topics, each topic carrying its explanatory text, an example snippet and the output
//! string a simulated run reveals.
//!
//! ## Ordering
//!
//! Both levels are insertion ordered (`IndexMap`), so the order in the JSON source is
//! the order of the sidebar. Sidebar numbers (see [`Catalogue::entries`]) are derived
//! from that order and are stable for a given catalogue.
//!
//! ## Sources
//!
//! - [`Catalogue::builtin`]: the catalogue compiled into the binary (`data/catalogue.json`)
//! - [`Catalogue::load`]: a JSON file with the same shape, for custom content
//!
//! The catalogue is validated once at load time (no empty catalogue, no empty category)
//! so a session can always fall back to the first topic.

use crate::error::{Result, StudyError};
use crate::model::{Category, Topic, TopicRef};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;

const BUILTIN_CATALOGUE: &str = include_str!("data/catalogue.json");

#[derive(Debug, Clone)]
pub struct Catalogue {
    categories: IndexMap<String, Category>,
}

/// One sidebar row: a topic together with its position in catalogue order.
#[derive(Debug, Clone, Copy)]
pub struct CatalogueEntry<'a> {
    /// 1-based position across the whole catalogue
    pub number: usize,
    pub category_key: &'a str,
    pub category: &'a Category,
    pub topic_key: &'a str,
    pub topic: &'a Topic,
}

impl CatalogueEntry<'_> {
    pub fn topic_ref(&self) -> TopicRef {
        TopicRef::new(self.category_key, self.topic_key)
    }
}

impl Catalogue {
    /// The Go catalogue shipped with gostudy.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOGUE)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let categories: IndexMap<String, Category> = serde_json::from_str(json)?;
        Self::new(categories)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(StudyError::Io)?;
        Self::from_json(&content)
    }

    pub fn new(categories: IndexMap<String, Category>) -> Result<Self> {
        if categories.is_empty() {
            return Err(StudyError::Catalogue("catalogue has no categories".into()));
        }
        if let Some((key, _)) = categories.iter().find(|(_, c)| c.topics.is_empty()) {
            return Err(StudyError::Catalogue(format!(
                "category '{}' has no topics",
                key
            )));
        }
        Ok(Self { categories })
    }

    pub fn category(&self, key: &str) -> Result<&Category> {
        self.categories
            .get(key)
            .ok_or_else(|| StudyError::UnknownCategory(key.to_string()))
    }

    pub fn topic(&self, category_key: &str, topic_key: &str) -> Result<&Topic> {
        self.category(category_key)?
            .topics
            .get(topic_key)
            .ok_or_else(|| StudyError::UnknownTopic {
                category: category_key.to_string(),
                topic: topic_key.to_string(),
            })
    }

    pub fn lookup(&self, topic_ref: &TopicRef) -> Result<&Topic> {
        self.topic(&topic_ref.category, &topic_ref.topic)
    }

    /// First topic of the first category. Always present after validation.
    pub fn first_topic(&self) -> TopicRef {
        self.entries()
            .next()
            .map(|e| e.topic_ref())
            .unwrap_or_else(|| TopicRef::new("", ""))
    }

    /// All topics in sidebar order, numbered from 1.
    pub fn entries(&self) -> impl Iterator<Item = CatalogueEntry<'_>> {
        self.categories
            .iter()
            .flat_map(|(ck, category)| {
                category
                    .topics
                    .iter()
                    .map(move |(tk, topic)| (ck.as_str(), category, tk.as_str(), topic))
            })
            .enumerate()
            .map(
                |(i, (category_key, category, topic_key, topic))| CatalogueEntry {
                    number: i + 1,
                    category_key,
                    category,
                    topic_key,
                    topic,
                },
            )
    }

    pub fn entry(&self, number: usize) -> Option<CatalogueEntry<'_>> {
        if number == 0 {
            return None;
        }
        self.entries().nth(number - 1)
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn topic_count(&self) -> usize {
        self.categories.values().map(|c| c.topics.len()).sum()
    }
}
