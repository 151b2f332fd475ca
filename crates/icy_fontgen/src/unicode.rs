//! Printable character classification for the preview.
//!
//! Cc, Cf, Co and the noncharacters are not printable. Unassigned codepoints
//! (Cn) count as printable, a font that maps one has a glyph to show for it.

/// Format characters (general category Cf).
const FORMAT_RANGES: &[(u32, u32)] = &[
    (0x00AD, 0x00AD),
    (0x0600, 0x0605),
    (0x061C, 0x061C),
    (0x06DD, 0x06DD),
    (0x070F, 0x070F),
    (0x0890, 0x0891),
    (0x08E2, 0x08E2),
    (0x180E, 0x180E),
    (0x200B, 0x200F),
    (0x202A, 0x202E),
    (0x2060, 0x2064),
    (0x2066, 0x206F),
    (0xFEFF, 0xFEFF),
    (0xFFF9, 0xFFFB),
    (0x110BD, 0x110BD),
    (0x110CD, 0x110CD),
    (0x13430, 0x1343F),
    (0x1BCA0, 0x1BCA3),
    (0x1D173, 0x1D17A),
    (0xE0001, 0xE0001),
    (0xE0020, 0xE007F),
];

/// Private use areas (general category Co).
const PRIVATE_USE_RANGES: &[(u32, u32)] = &[(0xE000, 0xF8FF), (0xF0000, 0xFFFFD), (0x100000, 0x10FFFD)];

fn in_ranges(cp: u32, ranges: &[(u32, u32)]) -> bool {
    ranges.iter().any(|&(start, end)| (start..=end).contains(&cp))
}

fn is_noncharacter(cp: u32) -> bool {
    (0xFDD0..=0xFDEF).contains(&cp) || cp & 0xFFFE == 0xFFFE
}

/// False for control, format, private use and noncharacter codepoints.
pub fn is_printable(ch: char) -> bool {
    let cp = ch as u32;
    !(ch.is_control() || in_ranges(cp, FORMAT_RANGES) || in_ranges(cp, PRIVATE_USE_RANGES) || is_noncharacter(cp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable() {
        for ch in ['A', ' ', '█', '☺', '\u{00A0}', 'ß', '⌂'] {
            assert!(is_printable(ch), "{ch:?}");
        }
    }

    #[test]
    fn unassigned_codepoints_are_printable() {
        for ch in ['\u{0378}', '\u{0530}', '\u{2FFFD}'] {
            assert!(is_printable(ch), "{ch:?}");
        }
    }

    #[test]
    fn not_printable() {
        for ch in ['\0', '\n', '\u{7F}', '\u{9B}', '\u{AD}', '\u{200B}', '\u{FEFF}', '\u{E000}', '\u{FFFF}', '\u{10FFFD}'] {
            assert!(!is_printable(ch), "{ch:?}");
        }
    }
}
