// Overlay controller
//
// Glue between a controller diagram and the input mapper: discovered button
// regions become click targets that start a remap, and the key map can be
// shown as a table next to the diagram.

mod diagram;
mod table;

pub use diagram::{discover_regions, region_button, REGION_PREFIX};
pub use table::{key_map_rows, KeyMapRow};

use crate::engine::input::{Button, Host, InputMapper, KeyMap, KeyValueStore, MessageBanner};
use log::info;

/// Text of the link that reveals the key map table
pub const SHOW_KEY_MAP: &str = "Show Key Map";

/// Overlay state: clickable buttons in diagram order and table visibility
#[derive(Debug, Default)]
pub struct Overlay {
    key_order: Vec<Button>,
    show_map: bool,
}

impl Overlay {
    /// Create an overlay with no regions
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover button regions once the diagram has loaded
    ///
    /// Replaces any previously discovered regions. A document that does not
    /// parse leaves the current regions in place.
    pub fn initialize(&mut self, document: &str) -> Result<&[Button], roxmltree::Error> {
        self.set_regions(discover_regions(document)?);
        Ok(&self.key_order)
    }

    /// Use an explicit set of clickable buttons
    pub fn set_regions(&mut self, buttons: impl IntoIterator<Item = Button>) {
        self.key_order = buttons.into_iter().collect();
        info!("Overlay bound {} button regions", self.key_order.len());
    }

    /// Buttons with click targets, in diagram order
    pub fn key_order(&self) -> &[Button] {
        &self.key_order
    }

    /// Handle a click on a button's region
    pub fn click<H: Host, S: KeyValueStore>(
        &mut self,
        button: Button,
        mapper: &mut InputMapper<H, S>,
    ) {
        self.show_map = false;
        mapper.enable_remap(button);
    }

    /// Handle a click on the region at `index`
    /// Returns the button clicked, if the index names a region
    pub fn click_region<H: Host, S: KeyValueStore>(
        &mut self,
        index: usize,
        mapper: &mut InputMapper<H, S>,
    ) -> Option<Button> {
        let button = *self.key_order.get(index)?;
        self.click(button, mapper);
        Some(button)
    }

    /// Check if the key map table is showing
    pub fn is_map_visible(&self) -> bool {
        self.show_map
    }

    /// Show or hide the key map table
    pub fn toggle_map(&mut self) {
        self.show_map = !self.show_map;
    }

    /// Hide the key map table
    pub fn hide_map(&mut self) {
        self.show_map = false;
    }

    /// Table rows for every discovered button
    pub fn rows(&self, keymap: &KeyMap) -> Vec<KeyMapRow> {
        key_map_rows(&self.key_order, keymap)
    }

    /// What the message area shows: the banner text, or the table link
    pub fn status_line<'a>(&self, banner: &'a MessageBanner) -> &'a str {
        banner.text().unwrap_or(SHOW_KEY_MAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::{
        LogicalInputEvent, MapperConfig, MemoryStore, RawKeyEvent, RemapState,
    };

    struct NullHost;

    impl Host for NullHost {
        fn on_input(&mut self, _event: LogicalInputEvent) {}
    }

    fn mapper() -> InputMapper<NullHost, MemoryStore> {
        InputMapper::new(MapperConfig::new("controller.svg"), MemoryStore::new(), NullHost)
    }

    const DIAGRAM: &str = r#"<svg>
  <path id="snex-button-LEFT"/>
  <path id="snex-button-RIGHT"/>
  <path id="snex-button-START"/>
</svg>"#;

    #[test]
    fn test_initialize_discovers_regions() {
        let mut overlay = Overlay::new();
        let order = overlay.initialize(DIAGRAM).unwrap().to_vec();
        assert_eq!(order, vec![Button::Left, Button::Right, Button::Start]);
    }

    #[test]
    fn test_initialize_replaces_previous_regions() {
        let mut overlay = Overlay::new();
        overlay.initialize(DIAGRAM).unwrap();
        overlay.initialize(r#"<svg><path id="snex-button-B"/></svg>"#).unwrap();

        assert_eq!(overlay.key_order(), &[Button::B]);
    }

    #[test]
    fn test_initialize_keeps_regions_on_parse_error() {
        let mut overlay = Overlay::new();
        overlay.initialize(DIAGRAM).unwrap();

        assert!(overlay.initialize("<svg>").is_err());
        assert_eq!(overlay.key_order().len(), 3);
    }

    #[test]
    fn test_click_starts_remap_and_hides_map() {
        let mut overlay = Overlay::new();
        let mut mapper = mapper();
        overlay.initialize(DIAGRAM).unwrap();
        overlay.toggle_map();
        assert!(overlay.is_map_visible());

        overlay.click(Button::Right, &mut mapper);

        assert!(!overlay.is_map_visible());
        assert_eq!(mapper.remap_state(), RemapState::WaitingForInput(Button::Right));
    }

    #[test]
    fn test_click_region_by_index() {
        let mut overlay = Overlay::new();
        let mut mapper = mapper();
        overlay.initialize(DIAGRAM).unwrap();

        assert_eq!(overlay.click_region(2, &mut mapper), Some(Button::Start));
        assert_eq!(mapper.remap_state(), RemapState::WaitingForInput(Button::Start));

        assert_eq!(overlay.click_region(3, &mut mapper), None);
    }

    #[test]
    fn test_rows_reflect_remaps() {
        let mut overlay = Overlay::new();
        let mut mapper = mapper();
        overlay.set_regions([Button::Left, Button::Select]);

        overlay.click(Button::Left, &mut mapper);
        mapper.handle_key_event(RawKeyEvent::pressed(37));

        let rows = overlay.rows(mapper.keymap());
        assert_eq!(rows[0].labels, "⭠ A");
        assert_eq!(rows[1].labels, "Q");
    }

    #[test]
    fn test_status_line() {
        let overlay = Overlay::new();
        let mut mapper = mapper();
        assert_eq!(overlay.status_line(mapper.banner()), SHOW_KEY_MAP);

        mapper.enable_remap(Button::A);
        assert_eq!(
            overlay.status_line(mapper.banner()),
            "Press any key to remap \"A\"."
        );
    }

    #[test]
    fn test_toggle_and_hide_map() {
        let mut overlay = Overlay::new();
        overlay.toggle_map();
        overlay.toggle_map();
        assert!(!overlay.is_map_visible());

        overlay.toggle_map();
        overlay.hide_map();
        assert!(!overlay.is_map_visible());
    }
}
