//! Single-line text editing state with a char-boundary-aware cursor.
//!
//! Terminal input arrives as composed characters, including multi-byte
//! Hangul, so every cursor move must land on a char boundary and the
//! rendered cursor column must account for double-width glyphs.

use unicode_width::UnicodeWidthStr;

#[derive(Default, Debug, Clone)]
pub struct LineEdit {
    buf: String,
    cursor: usize, // byte index at a char boundary
}

impl LineEdit {
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Replace the contents and park the cursor at the end.
    pub fn set(&mut self, s: impl Into<String>) {
        self.buf = s.into();
        self.cursor = self.buf.len();
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.buf.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_char_boundary(&self.buf, self.cursor);
        self.buf.drain(prev..self.cursor);
        self.cursor = prev;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.buf.len() {
            return;
        }
        let next = next_char_boundary(&self.buf, self.cursor);
        self.buf.drain(self.cursor..next);
    }

    pub fn move_left(&mut self) {
        self.cursor = prev_char_boundary(&self.buf, self.cursor);
    }

    pub fn move_right(&mut self) {
        self.cursor = next_char_boundary(&self.buf, self.cursor);
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buf.len();
    }

    /// Terminal column of the cursor, in display cells.
    pub fn display_cursor_col(&self) -> u16 {
        UnicodeWidthStr::width(&self.buf[..self.cursor]) as u16
    }
}

fn prev_char_boundary(s: &str, i: usize) -> usize {
    if i == 0 {
        return 0;
    }
    let mut j = i - 1;
    while j > 0 && !s.is_char_boundary(j) {
        j -= 1;
    }
    j
}

fn next_char_boundary(s: &str, i: usize) -> usize {
    if i >= s.len() {
        return s.len();
    }
    let mut j = i + 1;
    while j < s.len() && !s.is_char_boundary(j) {
        j += 1;
    }
    j
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace_multibyte() {
        let mut edit = LineEdit::default();
        for c in "도수치료".chars() {
            edit.insert_char(c);
        }
        assert_eq!(edit.as_str(), "도수치료");

        edit.backspace();
        assert_eq!(edit.as_str(), "도수치");
    }

    #[test]
    fn test_cursor_moves_on_char_boundaries() {
        let mut edit = LineEdit::default();
        edit.set("a도b");
        edit.move_left(); // before 'b'
        edit.move_left(); // before '도'
        edit.insert_char('x');
        assert_eq!(edit.as_str(), "ax도b");
    }

    #[test]
    fn test_display_cursor_col_counts_wide_glyphs() {
        let mut edit = LineEdit::default();
        edit.set("도수"); // two double-width glyphs
        assert_eq!(edit.display_cursor_col(), 4);
        edit.move_left();
        assert_eq!(edit.display_cursor_col(), 2);
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut edit = LineEdit::default();
        edit.set("MRI");
        edit.move_home();
        edit.delete();
        assert_eq!(edit.as_str(), "RI");
    }
}
