// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Line view over a document's text.

/// Document text split into lines
///
/// Lines end at `\n`, `\r\n` or a lone `\r`, the same breaks the protocol
/// counts, so line indices agree with editor positions.
#[derive(Debug, Clone)]
pub struct SourceLines<'a> {
    lines: Vec<&'a str>,
}

impl<'a> SourceLines<'a> {
    pub fn new(text: &'a str) -> Self {
        let bytes = text.as_bytes();
        let mut lines = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b'\n' => {
                    lines.push(&text[start..i]);
                    start = i + 1;
                }
                b'\r' => {
                    lines.push(&text[start..i]);
                    if bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    start = i + 1;
                }
                _ => {}
            }
            i += 1;
        }
        lines.push(&text[start..]);

        Self { lines }
    }

    /// Number of lines (never zero; empty text is one empty line)
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.lines.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.lines.iter().copied()
    }

    /// Width of a line in UTF-16 code units, 0 for an unknown line
    pub fn width(&self, index: usize) -> u32 {
        self.get(index).map(utf16_len).unwrap_or(0)
    }

    /// Index of the last line
    pub fn last_index(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }
}

/// Length of a string in UTF-16 code units
pub fn utf16_len(s: &str) -> u32 {
    s.encode_utf16().count() as u32
}

/// Line index of a byte offset, counted as line breaks before the offset
///
/// `\r\n` counts once, as in [`SourceLines`].
pub fn line_of_offset(text: &str, offset: usize) -> usize {
    let before = &text.as_bytes()[..offset.min(text.len())];
    before
        .iter()
        .enumerate()
        .filter(|&(i, &b)| b == b'\n' || (b == b'\r' && before.get(i + 1) != Some(&b'\n')))
        .count()
}
