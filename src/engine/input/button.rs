// Logical controller buttons and default key bindings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key code that cancels a pending remap (Escape)
pub const CANCEL_KEY: u32 = 27;

/// Logical controller buttons exposed to the host application
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Button {
    // Directions
    Up,
    Down,
    Left,
    Right,

    // Actions
    A,
    B,

    // Meta
    Select,
    Start,
}

impl Button {
    /// Every logical button, in controller order
    pub const ALL: [Button; 8] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
    ];

    /// Upper-case identifier used in storage and diagram region ids
    pub fn name(&self) -> &'static str {
        match self {
            Button::Up => "UP",
            Button::Down => "DOWN",
            Button::Left => "LEFT",
            Button::Right => "RIGHT",
            Button::A => "A",
            Button::B => "B",
            Button::Select => "SELECT",
            Button::Start => "START",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string does not name a known button
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown button: {0}")]
pub struct UnknownButton(pub String);

impl FromStr for Button {
    type Err = UnknownButton;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|button| button.name() == s)
            .ok_or_else(|| UnknownButton(s.to_string()))
    }
}

/// Built-in key bindings used when nothing valid is stored
pub fn default_bindings() -> Vec<(u32, Button)> {
    vec![
        // Movement (WASD)
        (65, Button::Left),
        (68, Button::Right),
        (87, Button::Up),
        (83, Button::Down),
        // Actions
        (80, Button::A),
        (79, Button::B),
        // Meta
        (81, Button::Select),
        (69, Button::Start),
    ]
}
