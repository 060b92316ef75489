//! Dispatcher applying logical events to the editor session.
//!
//! Sub-modules:
//! * `motion`  - cursor movement and page scrolling
//! * `edit`    - text mutation (insert/backspace/line break)
//! * `command` - command line editing and the save action
//!
//! Routing depends on the session mode: in Command mode printable input,
//! Backspace, Enter and Escape edit the command line and motions are ignored.
//! Resize, Save and Quit behave the same in both modes.

use core_config::Config;
use core_events::Event;
use core_state::{EditorSession, Mode};

mod command;
mod edit;
mod motion;

/// Result of dispatching a single `Event`.
///
/// `dirty` asks for a frame; whether it is a full repaint or a cursor-only
/// update is decided by `EditorSession::is_dirty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: false,
            quit: true,
        }
    }
}

pub fn dispatch(event: Event, session: &mut EditorSession, config: &Config) -> DispatchResult {
    tracing::trace!(target: "actions.dispatch", event = %event, mode = session.mode().label(), "dispatch");
    match event {
        Event::Quit => DispatchResult::quit(),
        Event::Resize(columns, rows) => {
            let ctx = config.context(columns, rows);
            session.resize(
                usize::from(ctx.text_columns()),
                usize::from(ctx.text_rows()),
            );
            DispatchResult::dirty()
        }
        Event::Save => command::handle_save(session),
        _ if matches!(session.mode(), Mode::Command(_)) => command::handle_command_key(event, session),
        Event::MoveUp
        | Event::MoveDown
        | Event::MoveLeft
        | Event::MoveRight
        | Event::PageUp
        | Event::PageDown => motion::handle_motion(event, session),
        Event::Enter | Event::PrintableChar(_) | Event::Backspace => edit::handle_edit(event, session),
        Event::Escape => {
            session.enter_command_mode();
            DispatchResult::dirty()
        }
    }
}
