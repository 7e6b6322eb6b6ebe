//! Both halves of a simulated run. Scheduling the delay between them is the API's job.

use crate::catalogue::Catalogue;
use crate::commands::CmdResult;
use crate::session::{RunTicket, Session};

pub fn begin(session: &mut Session) -> (RunTicket, CmdResult) {
    let ticket = session.begin_run();
    let result = CmdResult::default().with_display(session.display().clone());
    (ticket, result)
}

/// Applies a finished run. `None` when the ticket was stale and nothing changed.
pub fn complete(
    catalogue: &Catalogue,
    session: &mut Session,
    ticket: &RunTicket,
) -> Option<CmdResult> {
    if !session.complete_run(catalogue, ticket) {
        return None;
    }
    Some(CmdResult::default().with_display(session.display().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::RUNNING_PLACEHOLDER;

    #[test]
    fn begin_reports_running_display() {
        let catalogue = Catalogue::builtin().unwrap();
        let mut session = Session::at_first_topic(&catalogue).unwrap();
        let (_, result) = begin(&mut session);
        let display = result.display.unwrap();
        assert!(display.is_running);
        assert_eq!(display.output, RUNNING_PLACEHOLDER);
    }

    #[test]
    fn complete_reveals_output_ignoring_buffer() {
        let catalogue = Catalogue::builtin().unwrap();
        let mut session = Session::at_first_topic(&catalogue).unwrap();
        session.set_buffer("package main\nfunc main() { panic(\"boom\") }");
        let (ticket, _) = begin(&mut session);

        let result = complete(&catalogue, &mut session, &ticket).unwrap();
        assert_eq!(result.display.unwrap().output, "Welcome to Go");
    }

    #[test]
    fn stale_ticket_yields_nothing() {
        let catalogue = Catalogue::builtin().unwrap();
        let mut session = Session::at_first_topic(&catalogue).unwrap();
        let (stale, _) = begin(&mut session);
        let (_fresh, _) = begin(&mut session);
        assert!(complete(&catalogue, &mut session, &stale).is_none());
    }
}
