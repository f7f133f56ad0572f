//! Character classification for segmentation
//!
//! A "symbol" is any punctuation or symbol character (Unicode general
//! categories P* and S*). The standard library has no category query, so
//! the non-ASCII part is an explicit block table.

use chat_behavior_config::constants::segmentation::DASH_CHARS;

/// Punctuation or symbol character
pub fn is_symbol(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_punctuation();
    }
    if is_dash(c) {
        return true;
    }
    matches!(
        c as u32,
        // Latin-1 punctuation and symbols
        0x00A1..=0x00A9
            | 0x00AB..=0x00AC
            | 0x00AE..=0x00B1
            | 0x00B4
            | 0x00B6..=0x00B8
            | 0x00BB
            | 0x00BF
            | 0x00D7
            | 0x00F7
            // General punctuation (spaces and format controls excluded)
            | 0x2010..=0x2027
            | 0x2030..=0x205E
            // Currency
            | 0x20A0..=0x20C0
            // Arrows, math operators, technical, control pictures
            | 0x2190..=0x244A
            // Box drawing, shapes, misc symbols, dingbats, supplemental arrows
            | 0x2500..=0x2BFF
            | 0x2E00..=0x2E7F
            // CJK symbols and punctuation
            | 0x3001..=0x3004
            | 0x3008..=0x3020
            | 0x3030
            | 0x303D..=0x303F
            | 0x30FB
            // Vertical, compatibility and small forms
            | 0xFE10..=0xFE19
            | 0xFE30..=0xFE4F
            | 0xFE50..=0xFE6B
            // Fullwidth punctuation
            | 0xFF01..=0xFF0F
            | 0xFF1A..=0xFF20
            | 0xFF3B..=0xFF40
            | 0xFF5B..=0xFF65
            | 0xFFE0..=0xFFEE
            // Emoji and pictographs
            | 0x1F000..=0x1FAFF
    )
}

/// Dash characters: symbols that never close a chunk
pub fn is_dash(c: char) -> bool {
    DASH_CHARS.contains(c)
}
