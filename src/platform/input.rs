//! Raw input events to game commands

use crate::sim::Command;

/// Key that restarts the session
pub const RESTART_KEY: &str = " ";

/// Platform-neutral input event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown,
    PointerUp,
    TouchStart,
    TouchEnd,
    /// `KeyboardEvent.key` value
    Key(String),
}

/// Map an input event to a command; other keys are ignored
pub fn command_for(event: &InputEvent) -> Option<Command> {
    match event {
        InputEvent::PointerDown | InputEvent::TouchStart => Some(Command::BeginStretch),
        InputEvent::PointerUp | InputEvent::TouchEnd => Some(Command::ReleaseStretch),
        InputEvent::Key(key) if key == RESTART_KEY => Some(Command::Restart),
        InputEvent::Key(_) => None,
    }
}
