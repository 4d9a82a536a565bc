// Key code to logical button mapping

use super::button::{default_bindings, Button};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from raw key codes to logical buttons
///
/// Each key code resolves to at most one button, while a button may be
/// reachable from any number of key codes. Serializes as a flat JSON object
/// such as `{"65":"LEFT","87":"UP"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyMap {
    bindings: BTreeMap<u32, Button>,
}

impl KeyMap {
    /// Create an empty key map
    pub fn new() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Create a key map from a list of bindings
    pub fn from_bindings(bindings: impl IntoIterator<Item = (u32, Button)>) -> Self {
        let mut map = Self::new();
        for (key_code, button) in bindings {
            map.bind(key_code, button);
        }
        map
    }

    /// Bind a key code to a button, returning the button it was bound to before
    ///
    /// Other key codes bound to `button` are left untouched.
    pub fn bind(&mut self, key_code: u32, button: Button) -> Option<Button> {
        self.bindings.insert(key_code, button)
    }

    /// Get the button bound to a key code
    pub fn get(&self, key_code: u32) -> Option<Button> {
        self.bindings.get(&key_code).copied()
    }

    /// Check if a key code is bound to any button
    pub fn is_bound(&self, key_code: u32) -> bool {
        self.bindings.contains_key(&key_code)
    }

    /// All key codes bound to a button, in ascending order
    pub fn codes_for(&self, button: Button) -> Vec<u32> {
        self.bindings
            .iter()
            .filter(|(_, b)| **b == button)
            .map(|(code, _)| *code)
            .collect()
    }

    /// Check if a button has any bindings
    pub fn has_binding(&self, button: Button) -> bool {
        self.bindings.values().any(|b| *b == button)
    }

    /// Build the button -> key codes view
    ///
    /// Recomputed on every call; buttons without bindings are absent.
    pub fn reverse(&self) -> BTreeMap<Button, Vec<u32>> {
        let mut reverse: BTreeMap<Button, Vec<u32>> = BTreeMap::new();
        for (code, button) in &self.bindings {
            reverse.entry(*button).or_default().push(*code);
        }
        reverse
    }

    /// Iterate over all bindings in key code order
    pub fn iter(&self) -> impl Iterator<Item = (u32, Button)> + '_ {
        self.bindings.iter().map(|(code, button)| (*code, *button))
    }

    /// Number of bound key codes
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if nothing is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Serialize to the stored JSON form
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse the stored JSON form
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map_contents() {
        let map = KeyMap::default();
        assert_eq!(map.get(65), Some(Button::Left));
        assert_eq!(map.get(68), Some(Button::Right));
        assert_eq!(map.get(87), Some(Button::Up));
        assert_eq!(map.get(83), Some(Button::Down));
        assert_eq!(map.get(80), Some(Button::A));
        assert_eq!(map.get(79), Some(Button::B));
        assert_eq!(map.get(81), Some(Button::Select));
        assert_eq!(map.get(69), Some(Button::Start));
        assert_eq!(map.len(), 8);
    }

    #[test]
    fn test_bind_overwrites_only_that_key_code() {
        let mut map = KeyMap::default();
        let previous = map.bind(65, Button::Up);

        assert_eq!(previous, Some(Button::Left));
        assert_eq!(map.get(65), Some(Button::Up));
        // The old W binding for UP is kept
        assert_eq!(map.get(87), Some(Button::Up));
        assert!(!map.has_binding(Button::Left));
    }

    #[test]
    fn test_many_codes_for_one_button() {
        let mut map = KeyMap::default();
        map.bind(38, Button::Up);
        map.bind(32, Button::Up);

        assert_eq!(map.codes_for(Button::Up), vec![32, 38, 87]);
    }

    #[test]
    fn test_reverse_omits_unbound_buttons() {
        let map = KeyMap::from_bindings([(65, Button::Left), (37, Button::Left)]);
        let reverse = map.reverse();

        assert_eq!(reverse.get(&Button::Left), Some(&vec![37, 65]));
        assert!(reverse.get(&Button::Right).is_none());
    }

    #[test]
    fn test_reverse_tracks_mutations() {
        let mut map = KeyMap::default();
        map.bind(87, Button::Down);

        let reverse = map.reverse();
        assert!(reverse.get(&Button::Up).is_none());
        assert_eq!(reverse.get(&Button::Down), Some(&vec![83, 87]));
    }

    #[test]
    fn test_json_is_flat_object_of_string_keys() {
        let map = KeyMap::from_bindings([(32, Button::Up), (65, Button::Left)]);
        assert_eq!(map.to_json().unwrap(), r#"{"32":"UP","65":"LEFT"}"#);
    }

    #[test]
    fn test_from_json_rejects_unknown_buttons() {
        assert!(KeyMap::from_json(r#"{"65":"TURBO"}"#).is_err());
    }

    #[test]
    fn test_from_json_rejects_non_numeric_keys() {
        assert!(KeyMap::from_json(r#"{"left":"LEFT"}"#).is_err());
        assert!(KeyMap::from_json(r#"{"-1":"LEFT"}"#).is_err());
    }

    #[test]
    fn test_from_json_accepts_empty_object() {
        let map = KeyMap::from_json("{}").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_iter_is_ordered_by_key_code() {
        let map = KeyMap::default();
        let codes: Vec<u32> = map.iter().map(|(code, _)| code).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
    }
}
