// Key map table shown by the overlay

use crate::engine::input::{format_key_label, Button, KeyMap};
use std::fmt;

/// One table row: a button and the labels of its bound keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMapRow {
    pub button: Button,

    /// Space-separated key labels, empty when nothing is bound
    pub labels: String,
}

impl fmt::Display for KeyMapRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<6} {}", self.button.name(), self.labels)
    }
}

/// Build table rows for `order` from the current key map
pub fn key_map_rows(order: &[Button], keymap: &KeyMap) -> Vec<KeyMapRow> {
    let reverse = keymap.reverse();

    order
        .iter()
        .map(|button| {
            let labels = reverse
                .get(button)
                .map(|codes| {
                    codes
                        .iter()
                        .map(|code| format_key_label(*code))
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .unwrap_or_default();

            KeyMapRow {
                button: *button,
                labels,
            }
        })
        .collect()
}
