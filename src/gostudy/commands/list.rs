use crate::catalogue::Catalogue;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::DisplayTopic;

/// Sidebar rows, optionally limited to one category. Numbers stay global.
pub fn run(catalogue: &Catalogue, category: Option<&str>) -> Result<CmdResult> {
    if let Some(key) = category {
        catalogue.category(key)?;
    }

    let listed = catalogue
        .entries()
        .filter(|e| category.map_or(true, |key| e.category_key == key))
        .map(|e| DisplayTopic::from_entry(&e))
        .collect();

    Ok(CmdResult::default().with_listed_topics(listed))
}
