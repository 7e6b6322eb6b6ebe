use crate::commands::{CmdMessage, CmdResult};
use crate::session::Session;

pub fn run(session: &mut Session, indent_unit: &str) -> CmdResult {
    let before = session.buffer().to_string();
    session.format_buffer(indent_unit);

    let mut result = CmdResult::default();
    if session.buffer() == before {
        result.add_message(CmdMessage::info("Buffer already formatted."));
    } else {
        result.add_message(CmdMessage::success("Buffer formatted."));
    }
    result.with_buffer(session.buffer())
}
