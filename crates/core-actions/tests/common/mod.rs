#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{DispatchResult, dispatch};
use core_config::Config;
use core_events::Event;
use core_state::EditorSession;
use core_text::ColumnMapper;

/// Session over `lines` with a `width` x `height` text area and the given tab stop.
pub fn session_with(lines: &[&str], tab_stop: usize, width: usize, height: usize) -> EditorSession {
    let mut s = EditorSession::new(ColumnMapper::new(tab_stop), width, height);
    s.load_into(lines.iter().map(|l| l.as_bytes().to_vec()));
    s.clear_dirty();
    s
}

pub fn session(lines: &[&str]) -> EditorSession {
    session_with(lines, 2, 80, 10)
}

/// Dispatch every event in order, returning the last result.
pub fn drive(session: &mut EditorSession, events: &[Event]) -> DispatchResult {
    let cfg = Config::default();
    let mut last = DispatchResult::clean();
    for &event in events {
        last = dispatch(event, session, &cfg);
    }
    last
}

pub fn type_text(session: &mut EditorSession, text: &str) {
    let events: Vec<Event> = text.bytes().map(Event::PrintableChar).collect();
    drive(session, &events);
}

pub fn document(session: &EditorSession) -> Vec<u8> {
    session
        .buffer()
        .lines()
        .flat_map(|l| l.as_bytes().iter().copied())
        .collect()
}

/// (line, visual column) of the cursor.
pub fn at(session: &EditorSession) -> (usize, usize) {
    (session.logical_position().line, session.logical_column())
}
