//! Blocking terminal input: reads crossterm events and maps them onto the
//! closed `core_events::Event` set.
//!
//! Only key presses are considered (release/repeat reports are dropped), and
//! keys without a logical meaning are ignored rather than surfaced.

use anyhow::Context;
use core_events::Event;
use crossterm::event::{
    self as ct, KeyCode, KeyEvent, KeyEventKind, KeyModifiers as CMods,
};

/// Block until the next terminal event. `Ok(None)` when the event has no
/// logical mapping; callers simply read again.
pub fn read_event() -> anyhow::Result<Option<Event>> {
    let raw = ct::read().context("reading terminal event")?;
    Ok(translate(raw))
}

/// Map a raw crossterm event to a logical event.
pub fn translate(raw: ct::Event) -> Option<Event> {
    let mapped = match raw {
        ct::Event::Key(key) => translate_key(key),
        ct::Event::Resize(cols, rows) => Some(Event::Resize(cols, rows)),
        _ => None,
    };
    log_translation(mapped.as_ref());
    mapped
}

fn translate_key(key: KeyEvent) -> Option<Event> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(CMods::CONTROL) {
        return match key.code {
            KeyCode::Char('s' | 'S') => Some(Event::Save),
            KeyCode::Char('c' | 'C' | 'q' | 'Q') => Some(Event::Quit),
            _ => None,
        };
    }
    if key.modifiers.contains(CMods::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Up => Some(Event::MoveUp),
        KeyCode::Down => Some(Event::MoveDown),
        KeyCode::Left => Some(Event::MoveLeft),
        KeyCode::Right => Some(Event::MoveRight),
        KeyCode::PageUp => Some(Event::PageUp),
        KeyCode::PageDown => Some(Event::PageDown),
        KeyCode::Enter => Some(Event::Enter),
        KeyCode::Backspace => Some(Event::Backspace),
        KeyCode::Esc => Some(Event::Escape),
        KeyCode::Tab => Some(Event::PrintableChar(b'\t')),
        KeyCode::Char(c) if c.is_ascii_graphic() || c == ' ' => {
            Some(Event::PrintableChar(c as u8))
        }
        _ => None,
    }
}

#[inline]
fn log_translation(event: Option<&Event>) {
    match event {
        Some(e) => tracing::trace!(target: "input", kind = e.kind(), "translated"),
        None => tracing::trace!(target: "input", "ignored"),
    }
}
