//! Motion sub-dispatch: arrow keys and half-page scrolling.
//!
//! Vertical motions read the sticky target column kept by the session's
//! cursor; horizontal motions redefine it.

use super::DispatchResult;
use core_events::Event;
use core_state::{EditorSession, ScrollDirection};

pub(crate) fn handle_motion(event: Event, session: &mut EditorSession) -> DispatchResult {
    let before = session.logical_position();
    match event {
        Event::MoveUp => session.move_up(),
        Event::MoveDown => session.move_down(),
        Event::MoveLeft => session.move_left(),
        Event::MoveRight => session.move_right(),
        Event::PageUp => session.handle_scroll_page(ScrollDirection::Up),
        Event::PageDown => session.handle_scroll_page(ScrollDirection::Down),
        _ => return DispatchResult::clean(),
    }
    let after = session.logical_position();
    tracing::trace!(
        target: "actions.dispatch",
        kind = event.kind(),
        from_line = before.line,
        from_byte = before.byte,
        to_line = after.line,
        to_byte = after.byte,
        target_col = session.cursor().target_column(),
        "motion"
    );
    // Status row shows Ln/Col, so every motion asks for at least a cursor-only frame.
    DispatchResult::dirty()
}
