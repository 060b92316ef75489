//! Text edit handling: byte insertion, backspace and line breaks.

use super::DispatchResult;
use core_events::Event;
use core_state::EditorSession;

pub(crate) fn handle_edit(event: Event, session: &mut EditorSession) -> DispatchResult {
    let before = session.logical_position();
    let applied = match event {
        Event::PrintableChar(byte) => session.insert_byte(byte),
        Event::Enter => {
            session.insert_line_break_at_cursor();
            true
        }
        Event::Backspace => {
            session.delete_backward();
            true
        }
        _ => false,
    };
    if !applied {
        return DispatchResult::clean();
    }
    let after = session.logical_position();
    tracing::trace!(
        target: "actions.dispatch",
        op = event.kind(),
        line = before.line,
        byte = before.byte,
        to_line = after.line,
        to_byte = after.byte,
        lines = session.buffer().count(),
        "edit"
    );
    DispatchResult::dirty()
}
