use unicode_width::UnicodeWidthChar;

pub(super) const TAB_WIDTH: usize = 4;

/// Multi-line text buffer. `cursor` is a byte offset that always sits on a
/// char boundary.
#[derive(Debug, Default)]
pub(super) struct Editor {
    pub(super) buf: String,
    pub(super) cursor: usize,
}

impl Editor {
    pub(super) fn set(&mut self, s: impl Into<String>) {
        self.buf = s.into();
        self.cursor = self.buf.len();
    }

    pub(super) fn clear(&mut self) {
        self.buf.clear();
        self.cursor = 0;
    }

    pub(super) fn insert_char(&mut self, c: char) {
        self.buf.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Pasted text keeps its tabs; carriage returns are folded into newlines.
    pub(super) fn insert_str(&mut self, s: &str) {
        let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
        self.buf.insert_str(self.cursor, &normalized);
        self.cursor += normalized.len();
    }

    pub(super) fn newline(&mut self) {
        self.insert_char('\n');
    }

    pub(super) fn backspace(&mut self) {
        let Some(prev) = self.prev_boundary() else {
            return;
        };
        self.buf.replace_range(prev..self.cursor, "");
        self.cursor = prev;
    }

    pub(super) fn delete(&mut self) {
        let Some(next) = self.next_boundary() else {
            return;
        };
        self.buf.replace_range(self.cursor..next, "");
    }

    pub(super) fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub(super) fn move_right(&mut self) {
        if let Some(next) = self.next_boundary() {
            self.cursor = next;
        }
    }

    pub(super) fn move_home(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    pub(super) fn move_end(&mut self) {
        self.cursor = self.line_end(self.cursor);
    }

    pub(super) fn move_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            self.cursor = 0;
            return;
        }
        let col = display_width(&self.buf[start..self.cursor]);
        let prev_start = self.line_start(start - 1);
        self.cursor = self.offset_at_column(prev_start, col);
    }

    pub(super) fn move_down(&mut self) {
        let end = self.line_end(self.cursor);
        if end == self.buf.len() {
            self.cursor = end;
            return;
        }
        let col = display_width(&self.buf[self.line_start(self.cursor)..self.cursor]);
        self.cursor = self.offset_at_column(end + 1, col);
    }

    /// Row and display column of the cursor, with tabs expanded.
    pub(super) fn cursor_position(&self) -> (usize, usize) {
        let before = &self.buf[..self.cursor];
        let row = before.matches('\n').count();
        let line = &before[self.line_start(self.cursor)..];
        (row, display_width(line))
    }

    pub(super) fn display_lines(&self) -> Vec<String> {
        self.buf.split('\n').map(expand_tabs).collect()
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.buf[..self.cursor]
            .chars()
            .next_back()
            .map(|c| self.cursor - c.len_utf8())
    }

    fn next_boundary(&self) -> Option<usize> {
        self.buf[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    fn line_start(&self, at: usize) -> usize {
        self.buf[..at].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, at: usize) -> usize {
        self.buf[at..]
            .find('\n')
            .map(|i| at + i)
            .unwrap_or(self.buf.len())
    }

    /// Byte offset of the last char boundary on the line at or left of
    /// display column `col`, so the cursor never lands inside a wide char.
    fn offset_at_column(&self, start: usize, col: usize) -> usize {
        let end = self.line_end(start);
        let mut width = 0;
        for (i, c) in self.buf[start..end].char_indices() {
            let next = advance(width, c);
            if next > col {
                return start + i;
            }
            width = next;
        }
        end
    }
}

/// Column after drawing `c` at column `width`.
fn advance(width: usize, c: char) -> usize {
    if c == '\t' {
        width + TAB_WIDTH - width % TAB_WIDTH
    } else {
        width + c.width().unwrap_or(0)
    }
}

fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut width = 0;
    for c in line.chars() {
        let next = advance(width, c);
        if c == '\t' {
            out.extend(std::iter::repeat_n(' ', next - width));
        } else {
            out.push(c);
        }
        width = next;
    }
    out
}

fn display_width(line: &str) -> usize {
    line.chars().fold(0, advance)
}

#[cfg(test)]
#[path = "../tests/tui_shell/editor_tests.rs"]
mod tests;
