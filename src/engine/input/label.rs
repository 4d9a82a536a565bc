// Human-readable labels for raw key codes

use unicode_general_category::{get_general_category, GeneralCategory};

/// Arrow key codes and the glyphs shown for them
const ARROW_GLYPHS: [(u32, char); 4] = [
    (37, '\u{2B60}'), // ⭠
    (38, '\u{2B61}'), // ⭡
    (39, '\u{2B62}'), // ⭢
    (40, '\u{2B63}'), // ⭣
];

/// Format a key code for display
///
/// Arrow keys become arrow glyphs, other codes are read as a character code
/// point, and anything without a printable character falls back to the
/// decimal code.
pub fn format_key_label(key_code: u32) -> String {
    if let Some((_, glyph)) = ARROW_GLYPHS.iter().find(|(code, _)| *code == key_code) {
        return glyph.to_string();
    }

    match char::from_u32(key_code) {
        Some(c) if is_printable(c) => c.to_string(),
        _ => key_code.to_string(),
    }
}

/// Check if a character renders as a visible glyph or a space
fn is_printable(c: char) -> bool {
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Unassigned
            | GeneralCategory::PrivateUse
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}
