use crate::catalogue::Catalogue;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::display_topic;
use crate::model::TopicRef;

pub fn run(catalogue: &Catalogue, topic_ref: &TopicRef) -> Result<CmdResult> {
    let topic = display_topic(catalogue, topic_ref)?;
    let code = topic.topic.content.code.clone();
    Ok(CmdResult::default().with_topic(topic).with_buffer(code))
}
