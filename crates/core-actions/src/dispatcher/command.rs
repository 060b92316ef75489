//! Command line editing and the save action.
//!
//! The command line is only collected; executing it reports that commands are
//! not supported. Saving writes every line back to the session's file and
//! reports the outcome in the status row. A failed save leaves the document
//! and the modified flag untouched.

use super::DispatchResult;
use crate::io_ops::write_session;
use core_events::Event;
use core_state::EditorSession;

pub(crate) fn handle_command_key(event: Event, session: &mut EditorSession) -> DispatchResult {
    match event {
        Event::PrintableChar(byte) => session.command_push(byte),
        Event::Backspace => session.command_backspace(),
        Event::Enter => session.execute_command(),
        Event::Escape => session.cancel_command(),
        _ => return DispatchResult::clean(),
    }
    DispatchResult::dirty()
}

pub(crate) fn handle_save(session: &mut EditorSession) -> DispatchResult {
    match write_session(session, None) {
        Ok(bytes) => {
            let lines = session.buffer().count();
            session.mark_saved();
            session.set_status(format!("wrote {lines} lines, {bytes} bytes"));
        }
        Err(e) => {
            tracing::error!(target: "io", error = %e, "save_failed");
            session.set_status(format!("save failed: {e}"));
        }
    }
    DispatchResult::dirty()
}
