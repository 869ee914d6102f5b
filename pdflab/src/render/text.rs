//! Text helpers for generated pages: wrapping, truncation and encoding.

/// Characters of a display name shown in an index row before truncation.
pub const MAX_INDEX_NAME_CHARS: usize = 60;

/// Marker appended to truncated display names.
pub const TRUNCATION_MARKER: &str = "..";

/// Byte substituted for characters WinAnsiEncoding cannot represent.
const REPLACEMENT: u8 = b'?';

/// WinAnsiEncoding bytes 0x80..=0x9F that differ from Latin-1.
const WIN_ANSI_HIGH: [(u8, char); 27] = [
    (0x80, '€'),
    (0x82, '‚'),
    (0x83, 'ƒ'),
    (0x84, '„'),
    (0x85, '…'),
    (0x86, '†'),
    (0x87, '‡'),
    (0x88, 'ˆ'),
    (0x89, '‰'),
    (0x8A, 'Š'),
    (0x8B, '‹'),
    (0x8C, 'Œ'),
    (0x8E, 'Ž'),
    (0x91, '‘'),
    (0x92, '’'),
    (0x93, '“'),
    (0x94, '”'),
    (0x95, '•'),
    (0x96, '–'),
    (0x97, '—'),
    (0x98, '˜'),
    (0x99, '™'),
    (0x9A, 'š'),
    (0x9B, '›'),
    (0x9C, 'œ'),
    (0x9E, 'ž'),
    (0x9F, 'Ÿ'),
];

/// Greedily wrap `text` into lines of at most `width` characters.
///
/// Runs of whitespace collapse to a single space. Words longer than
/// `width` are split across lines. Blank input yields no lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while !word.is_empty() {
            let separator = usize::from(current_len > 0);
            let room = width.saturating_sub(current_len + separator);

            if word.len() <= room {
                if separator == 1 {
                    current.push(' ');
                }
                current.extend(word.iter());
                current_len += separator + word.len();
                break;
            }

            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                continue;
            }

            // Word alone is wider than a line.
            let rest = word.split_off(width);
            lines.push(word.iter().collect());
            word = rest;
        }
    }

    if current_len > 0 {
        lines.push(current);
    }

    lines
}

/// Shorten a display name for an index row.
pub fn truncate_display_name(name: &str) -> String {
    if name.chars().count() > MAX_INDEX_NAME_CHARS {
        let head: String = name.chars().take(MAX_INDEX_NAME_CHARS).collect();
        format!("{head}{TRUNCATION_MARKER}")
    } else {
        name.to_string()
    }
}

/// Encode text for a simple font using WinAnsiEncoding.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u8,
            _ => WIN_ANSI_HIGH
                .iter()
                .find(|(_, mapped)| *mapped == c)
                .map(|(byte, _)| *byte)
                .unwrap_or(REPLACEMENT),
        })
        .collect()
}

/// Decode WinAnsiEncoding bytes back into text.
pub fn decode_win_ansi(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| {
            WIN_ANSI_HIGH
                .iter()
                .find(|(byte, _)| *byte == b)
                .map(|(_, c)| *c)
                .unwrap_or(b as char)
        })
        .collect()
}
