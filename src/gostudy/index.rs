//! # Topic Addressing
//!
//! Topics have stable `category/topic` keys (`basics/project`), which are precise but
//! tedious to type. The sidebar therefore numbers every topic in catalogue order, and
//! the number can be used anywhere a topic is expected:
//!
//! ```text
//! gostudy show basics/project
//! gostudy show 1
//! ```
//!
//! A [`TopicSelector`] is what the user typed; resolving it against a catalogue yields a
//! [`TopicRef`] that is known to exist. Only resolved refs ever reach the session.

use crate::catalogue::{Catalogue, CatalogueEntry};
use crate::error::{Result, StudyError};
use crate::model::{Category, Topic, TopicRef};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicSelector {
    Path(TopicRef),
    Number(usize),
}

impl FromStr for TopicSelector {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            if n == 0 {
                return Err(StudyError::InvalidSelector(s.to_string()));
            }
            return Ok(TopicSelector::Number(n));
        }
        s.parse::<TopicRef>().map(TopicSelector::Path)
    }
}

impl TopicSelector {
    pub fn resolve(&self, catalogue: &Catalogue) -> Result<TopicRef> {
        match self {
            TopicSelector::Path(r) => catalogue.lookup(r).map(|_| r.clone()),
            TopicSelector::Number(n) => catalogue
                .entry(*n)
                .map(|e| e.topic_ref())
                .ok_or_else(|| {
                    StudyError::InvalidSelector(format!(
                        "{} (catalogue has {} topics)",
                        n,
                        catalogue.topic_count()
                    ))
                }),
        }
    }
}

/// An owned sidebar row, detached from the catalogue borrow so it can travel in a
/// [`CmdResult`](crate::commands::CmdResult).
#[derive(Debug, Clone)]
pub struct DisplayTopic {
    pub number: usize,
    pub topic_ref: TopicRef,
    pub category_title: String,
    pub category_icon: String,
    pub topic: Topic,
}

impl DisplayTopic {
    pub fn from_entry(entry: &CatalogueEntry<'_>) -> Self {
        Self::build(
            entry.number,
            entry.topic_ref(),
            entry.category,
            entry.topic,
        )
    }

    fn build(number: usize, topic_ref: TopicRef, category: &Category, topic: &Topic) -> Self {
        Self {
            number,
            topic_ref,
            category_title: category.title.clone(),
            category_icon: category.icon.clone(),
            topic: topic.clone(),
        }
    }
}

/// Finds the sidebar row for a resolved ref.
pub fn display_topic(catalogue: &Catalogue, topic_ref: &TopicRef) -> Result<DisplayTopic> {
    catalogue
        .entries()
        .find(|e| e.category_key == topic_ref.category && e.topic_key == topic_ref.topic)
        .map(|e| DisplayTopic::from_entry(&e))
        .ok_or_else(|| match catalogue.category(&topic_ref.category) {
            Err(e) => e,
            Ok(_) => StudyError::UnknownTopic {
                category: topic_ref.category.clone(),
                topic: topic_ref.topic.clone(),
            },
        })
}

/// Parses and resolves a user-supplied selector in one step.
pub fn resolve_selector(catalogue: &Catalogue, input: &str) -> Result<TopicRef> {
    input.parse::<TopicSelector>()?.resolve(catalogue)
}
