// Discovery of clickable button regions in a controller diagram

use crate::engine::input::Button;
use log::warn;
use roxmltree::{Document, ParsingOptions};

/// Id prefix marking a diagram region as a button
pub const REGION_PREFIX: &str = "snex-button-";

/// Button named by a region id, if the id follows the naming convention
pub fn region_button(id: &str) -> Option<Button> {
    let name = id.strip_prefix(REGION_PREFIX)?;
    match name.parse() {
        Ok(button) => Some(button),
        Err(e) => {
            warn!("Skipping diagram region '{}': {}", id, e);
            None
        }
    }
}

/// Find button regions in an SVG/XML document, in document order
///
/// Only element `id` attributes count; comments and text are ignored.
/// Repeated buttons are kept once.
pub fn discover_regions(document: &str) -> Result<Vec<Button>, roxmltree::Error> {
    // Editor-exported SVGs often carry a DOCTYPE
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(document, options)?;

    let mut buttons = Vec::new();
    for node in document.descendants().filter(|node| node.is_element()) {
        let Some(button) = node.attribute("id").and_then(region_button) else {
            continue;
        };
        if !buttons.contains(&button) {
            buttons.push(button);
        }
    }

    Ok(buttons)
}
