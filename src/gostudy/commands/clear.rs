use crate::commands::CmdResult;
use crate::session::Session;

pub fn run(session: &mut Session) -> CmdResult {
    session.clear_output();
    CmdResult::default().with_display(session.display().clone())
}
