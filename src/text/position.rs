use crate::domain::{Position, Range};

/// Maps between byte offsets and line/character positions over one text
/// snapshot. Character columns are UTF-16 code units, matching what editor
/// hosts report for cursor positions.
pub struct PositionMapper<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> PositionMapper<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            line_starts: compute_line_starts(text),
        }
    }

    /// Byte offset of the end of a line, excluding its newline.
    fn line_end(&self, line: usize) -> usize {
        if line + 1 < self.line_starts.len() {
            self.line_starts[line + 1] - 1
        } else {
            self.text.len()
        }
    }

    /// Convert a position to a byte offset.
    ///
    /// Columns past the end of the line clamp to the line end.
    pub fn position_to_byte(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        let line_start = *self.line_starts.get(line)?;
        let line_text = &self.text[line_start..self.line_end(line)];

        match utf16_to_byte_in_line(line_text, position.character as usize) {
            Some(byte) => Some(line_start + byte),
            None => Some(line_start + line_text.len()),
        }
    }

    /// Convert a byte offset to a position.
    ///
    /// Offsets inside a multi-byte character snap back to the character
    /// boundary; offsets past the end of the text return None.
    pub fn byte_to_position(&self, offset: usize) -> Option<Position> {
        if offset > self.text.len() {
            return None;
        }
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(insertion) => insertion.saturating_sub(1),
        };
        let line_start = self.line_starts[line];
        let line_text = &self.text[line_start..self.line_end(line).min(self.text.len())];
        let mut in_line = offset - line_start;

        loop {
            if let Some(character) = byte_to_utf16_in_line(line_text, in_line) {
                return Some(Position::new(line as u32, character as u32));
            }
            if in_line == 0 {
                return Some(Position::new(line as u32, 0));
            }
            in_line -= 1;
        }
    }

    /// Convert a byte range to a position range.
    pub fn byte_range_to_range(&self, start: usize, end: usize) -> Option<Range> {
        Some(Range::new(
            self.byte_to_position(start)?,
            self.byte_to_position(end)?,
        ))
    }
}

/// Compute line start offsets for binary-searchable position mapping.
pub fn compute_line_starts(text: &str) -> Vec<usize> {
    let mut line_starts = vec![0];
    let mut offset = 0;
    for ch in text.chars() {
        offset += ch.len_utf8();
        if ch == '\n' {
            line_starts.push(offset);
        }
    }
    line_starts
}

/// UTF-16 column to byte offset within one line. None when the column is
/// past the end of the line.
fn utf16_to_byte_in_line(line_text: &str, utf16_pos: usize) -> Option<usize> {
    let mut byte = 0;
    let mut utf16 = 0;
    for ch in line_text.chars() {
        if utf16 >= utf16_pos {
            return Some(byte);
        }
        utf16 += ch.len_utf16();
        byte += ch.len_utf8();
    }
    (utf16 == utf16_pos).then_some(byte)
}

/// Byte offset to UTF-16 column within one line. None when the offset is
/// inside a multi-byte character or past the end of the line.
fn byte_to_utf16_in_line(line_text: &str, byte_pos: usize) -> Option<usize> {
    let mut byte = 0;
    let mut utf16 = 0;
    for ch in line_text.chars() {
        if byte == byte_pos {
            return Some(utf16);
        }
        if byte + ch.len_utf8() > byte_pos {
            return None;
        }
        byte += ch.len_utf8();
        utf16 += ch.len_utf16();
    }
    (byte == byte_pos).then_some(utf16)
}
