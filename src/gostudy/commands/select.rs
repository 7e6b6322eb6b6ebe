use crate::catalogue::Catalogue;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::display_topic;
use crate::model::TopicRef;
use crate::session::Session;

pub fn run(
    catalogue: &Catalogue,
    session: &mut Session,
    topic_ref: &TopicRef,
) -> Result<CmdResult> {
    session.select(catalogue, topic_ref)?;
    let topic = display_topic(catalogue, session.selection())?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Selected {} ({})",
        topic.topic.title, topic.topic_ref
    )));
    Ok(result
        .with_topic(topic)
        .with_buffer(session.buffer())
        .with_display(session.display().clone()))
}
