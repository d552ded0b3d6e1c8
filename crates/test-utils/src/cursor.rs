// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Cursor markers in test input
//!
//! Tests write `FI|ND users` to place the cursor; these helpers strip the
//! `|` and report where it was as a line and UTF-16 column.

/// Cursor marker character
pub const CURSOR_MARKER: char = '|';

/// Get the byte offset of the cursor marker
pub fn get_cursor_offset(input: &str) -> Option<usize> {
    input.find(CURSOR_MARKER)
}

/// Remove the cursor marker from input text
pub fn remove_cursor_marker(input: &str) -> String {
    input.replacen(CURSOR_MARKER, "", 1)
}

/// Split input into text without the marker and the cursor's (line, column)
///
/// Panics if the input has no marker.
pub fn split_cursor(input: &str) -> (String, u32, u32) {
    let offset = get_cursor_offset(input)
        .unwrap_or_else(|| panic!("no cursor marker '{}' in {:?}", CURSOR_MARKER, input));

    let before = &input[..offset];
    let line = before.matches('\n').count() as u32;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].encode_utf16().count() as u32;

    (remove_cursor_marker(input), line, column)
}
