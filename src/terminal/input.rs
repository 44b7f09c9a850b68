/// Keyboard input: drains pending terminal key events into player intents
use crate::game::Intent;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

/// Key bindings shown before the game starts
pub const CONTROLS: &[(&str, &str)] = &[
    ("w/s", "look up / down"),
    ("a/d", "look left / right"),
    ("i/k", "move forward / back"),
    ("j/l", "strafe left / right"),
    ("x", "remove block"),
    ("space", "place block"),
    ("q", "quit"),
];

/// Translate one key event. Releases and unbound keys map to nothing.
pub fn intent_for_key(key: &KeyEvent) -> Option<Intent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Intent::Quit);
    }

    let intent = match key.code {
        KeyCode::Char('w') | KeyCode::Up => Intent::Turn { yaw: 0.0, pitch: 1.0 },
        KeyCode::Char('s') | KeyCode::Down => Intent::Turn { yaw: 0.0, pitch: -1.0 },
        KeyCode::Char('d') | KeyCode::Right => Intent::Turn { yaw: 1.0, pitch: 0.0 },
        KeyCode::Char('a') | KeyCode::Left => Intent::Turn { yaw: -1.0, pitch: 0.0 },
        KeyCode::Char('i') => Intent::Move { forward: 1.0, strafe: 0.0 },
        KeyCode::Char('k') => Intent::Move { forward: -1.0, strafe: 0.0 },
        KeyCode::Char('j') => Intent::Move { forward: 0.0, strafe: -1.0 },
        KeyCode::Char('l') => Intent::Move { forward: 0.0, strafe: 1.0 },
        KeyCode::Char('x') => Intent::Break,
        KeyCode::Char(' ') => Intent::Place,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Intent::Quit,
        _ => return None,
    };
    Some(intent)
}

/// Per-frame key state: each intent counts once per frame no matter how
/// many repeats the terminal delivered
#[derive(Debug, Default)]
pub struct InputState {
    intents: Vec<Intent>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every pending event without blocking.
    pub fn poll(&mut self) -> io::Result<&[Intent]> {
        self.intents.clear();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(intent) = intent_for_key(&key) {
                    self.push(intent);
                }
            }
        }
        Ok(&self.intents)
    }

    pub fn push(&mut self, intent: Intent) {
        if !self.intents.contains(&intent) {
            self.intents.push(intent);
        }
    }
}
