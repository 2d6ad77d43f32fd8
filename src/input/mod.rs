//! Input adapters.
//!
//! Every input source (keyboard, on-screen buttons, gestures) ends up calling
//! [`InputAdapter::request_direction`]. Sources running on other threads go through an [`InputSlot`],
//! which the game loop drains once per tick.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use smallvec::SmallVec;

use crate::{entity::direction::Direction, input::commands::GameCommand};

pub mod commands;

/// The single entry point input sources use to steer Pac-Man.
///
/// There is no return value and no failure mode: a request the game cannot act on is dropped.
pub trait InputAdapter {
    fn request_direction(&mut self, direction: Direction);
}

/// A last-write-wins mailbox for commands coming from other threads.
///
/// Writers overwrite whatever is pending; the game loop takes the latest value before each tick.
#[derive(Debug, Clone, Default)]
pub struct InputSlot(Arc<Mutex<Option<GameCommand>>>);

impl InputSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any pending command.
    pub fn submit(&self, command: GameCommand) {
        *self.0.lock() = Some(command);
    }

    /// Takes the pending command, leaving the slot empty.
    pub fn take(&self) -> Option<GameCommand> {
        self.0.lock().take()
    }
}

impl InputAdapter for InputSlot {
    fn request_direction(&mut self, direction: Direction) {
        self.submit(GameCommand::MovePlayer(direction));
    }
}

/// Maps key codes (DOM `KeyboardEvent.code` names, e.g. `ArrowUp`, `KeyW`) to commands.
#[derive(Debug, Clone)]
pub struct Bindings {
    key_bindings: HashMap<&'static str, GameCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut key_bindings = HashMap::new();

        // Player movement
        key_bindings.insert("ArrowUp", GameCommand::MovePlayer(Direction::Up));
        key_bindings.insert("KeyW", GameCommand::MovePlayer(Direction::Up));
        key_bindings.insert("ArrowDown", GameCommand::MovePlayer(Direction::Down));
        key_bindings.insert("KeyS", GameCommand::MovePlayer(Direction::Down));
        key_bindings.insert("ArrowLeft", GameCommand::MovePlayer(Direction::Left));
        key_bindings.insert("KeyA", GameCommand::MovePlayer(Direction::Left));
        key_bindings.insert("ArrowRight", GameCommand::MovePlayer(Direction::Right));
        key_bindings.insert("KeyD", GameCommand::MovePlayer(Direction::Right));

        // Game actions
        key_bindings.insert("KeyP", GameCommand::TogglePause);
        key_bindings.insert("Escape", GameCommand::Exit);
        key_bindings.insert("KeyQ", GameCommand::Exit);

        Self { key_bindings }
    }
}

impl Bindings {
    /// Looks up the command for a key code. Unbound keys map to [`GameCommand::AnyKey`].
    pub fn command_for(&self, code: &str) -> GameCommand {
        self.key_bindings.get(code).copied().unwrap_or(GameCommand::AnyKey)
    }
}

/// Decodes a line typed into a terminal into key codes.
///
/// Letters become `Key<LETTER>`, ANSI arrow sequences become `Arrow*`, and a lone ESC is `Escape`.
/// An empty line (just Enter) is reported as `Enter`.
pub fn decode_terminal_line(line: &str) -> SmallVec<[String; 4]> {
    let mut codes = SmallVec::new();
    let mut chars = line.trim_end_matches(['\r', '\n']).chars().peekable();

    if chars.peek().is_none() {
        codes.push("Enter".to_string());
        return codes;
    }

    while let Some(c) = chars.next() {
        match c {
            '\x1b' if chars.peek() == Some(&'[') => {
                chars.next();
                let code = match chars.next() {
                    Some('A') => "ArrowUp",
                    Some('B') => "ArrowDown",
                    Some('C') => "ArrowRight",
                    Some('D') => "ArrowLeft",
                    _ => "Unidentified",
                };
                codes.push(code.to_string());
            }
            '\x1b' => codes.push("Escape".to_string()),
            ' ' => codes.push("Space".to_string()),
            c if c.is_ascii_alphabetic() => codes.push(format!("Key{}", c.to_ascii_uppercase())),
            c if c.is_ascii_digit() => codes.push(format!("Digit{c}")),
            _ => codes.push("Unidentified".to_string()),
        }
    }

    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_is_last_write_wins() {
        let slot = InputSlot::new();
        slot.submit(GameCommand::MovePlayer(Direction::Up));
        slot.submit(GameCommand::MovePlayer(Direction::Left));
        assert_eq!(slot.take(), Some(GameCommand::MovePlayer(Direction::Left)));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn test_slot_clones_share_state() {
        let slot = InputSlot::new();
        let mut writer = slot.clone();
        writer.request_direction(Direction::Down);
        assert_eq!(slot.take(), Some(GameCommand::MovePlayer(Direction::Down)));
    }

    #[test]
    fn test_decode_terminal_line() {
        assert_eq!(decode_terminal_line("wd\n").as_slice(), ["KeyW", "KeyD"]);
        assert_eq!(decode_terminal_line("\x1b[A\x1b[D").as_slice(), ["ArrowUp", "ArrowLeft"]);
        assert_eq!(decode_terminal_line("\x1b").as_slice(), ["Escape"]);
        assert_eq!(decode_terminal_line("\n").as_slice(), ["Enter"]);
    }
}
