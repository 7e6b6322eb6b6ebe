use crate::catalogue::{Catalogue, CatalogueEntry};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::DisplayTopic;

/// Case-insensitive match over title, description, key points and category title.
pub fn run(catalogue: &Catalogue, term: &str) -> Result<CmdResult> {
    let needle = term.trim().to_lowercase();
    let listed: Vec<DisplayTopic> = catalogue
        .entries()
        .filter(|e| !needle.is_empty() && matches(e, &needle))
        .map(|e| DisplayTopic::from_entry(&e))
        .collect();

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info(format!("No topics match '{}'.", term)));
    }
    Ok(result.with_listed_topics(listed))
}

fn matches(entry: &CatalogueEntry<'_>, needle: &str) -> bool {
    let topic = entry.topic;
    let contains = |s: &str| s.to_lowercase().contains(needle);

    contains(&topic.title)
        || contains(&topic.description)
        || contains(&entry.category.title)
        || topic.content.key_points.iter().any(|k| contains(k))
}
