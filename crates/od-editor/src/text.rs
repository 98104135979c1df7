//! The text pane: an editable buffer with per-range tags.
//!
//! `TextArea` is what the engine needs from the host's text widget.
//! `MemoryTextArea` is a rope-backed implementation for headless use.

use ropey::Rope;
use std::collections::HashMap;
use std::ops::Range;

/// A position in the buffer: zero-based line and char column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TextPos {
    pub line: usize,
    pub column: usize,
}

impl TextPos {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Operations the engine needs from a host text widget.
pub trait TextArea {
    /// Full buffer contents. Lines are separated by `\n`.
    fn text(&self) -> String;

    /// Replace the whole buffer. Raises the content-changed notification.
    fn set_text(&mut self, text: &str);

    /// Apply `tag` to the span `start..end`.
    fn tag_range(&mut self, tag: &str, start: TextPos, end: TextPos);

    /// Remove `tag` from the whole buffer.
    fn clear_tag(&mut self, tag: &str);

    /// Drain the content-changed notification: `true` if the buffer changed
    /// since the last call, by the user or through `set_text`.
    fn take_content_changed(&mut self) -> bool;
}

// ─── Rope-backed buffer ──────────────────────────────────────────────────

/// Headless text area. Tags are stored as char ranges; any edit drops
/// them, the engine re-tags on its next pass.
#[derive(Debug)]
pub struct MemoryTextArea {
    rope: Rope,
    tags: HashMap<String, Vec<Range<usize>>>,
    changed: bool,
    writes: usize,
}

impl Default for MemoryTextArea {
    fn default() -> Self {
        Self::with_text("")
    }
}

impl MemoryTextArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer holding `text`, with no pending change notification.
    pub fn with_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            tags: HashMap::new(),
            changed: false,
            writes: 0,
        }
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Contents of `line` without its line break.
    pub fn line_text(&self, line: usize) -> String {
        let slice = self.rope.line(line);
        slice.slice(..self.line_len(line)).to_string()
    }

    /// Lines carrying `tag`, ascending.
    pub fn tagged_lines(&self, tag: &str) -> Vec<usize> {
        let mut lines: Vec<usize> = self
            .tags
            .get(tag)
            .into_iter()
            .flatten()
            .map(|range| self.rope.char_to_line(range.start))
            .collect();
        lines.sort_unstable();
        lines.dedup();
        lines
    }

    /// Char ranges carrying `tag`, in the order they were applied.
    pub fn tag_ranges(&self, tag: &str) -> &[Range<usize>] {
        self.tags.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of `set_text` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Simulate the user retyping one line.
    pub fn edit_line(&mut self, line: usize, text: &str) {
        let start = self.rope.line_to_char(line);
        let end = start + self.line_len(line);
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        self.touch();
    }

    /// Simulate the user inserting a line before `line` (or appending one
    /// when `line` is past the end).
    pub fn insert_line(&mut self, line: usize, text: &str) {
        if line < self.rope.len_lines() {
            let at = self.rope.line_to_char(line);
            self.rope.insert(at, &format!("{text}\n"));
        } else {
            let at = self.rope.len_chars();
            self.rope.insert(at, &format!("\n{text}"));
        }
        self.touch();
    }

    /// Simulate the user deleting `line` and its line break.
    pub fn remove_line(&mut self, line: usize) {
        let start = self.rope.line_to_char(line);
        let end = start + self.rope.line(line).len_chars();
        if end > start + self.line_len(line) || line == 0 {
            self.rope.remove(start..end);
        } else {
            // Last line: take the break that precedes it instead.
            self.rope.remove(start - 1..end);
        }
        self.touch();
    }

    fn line_len(&self, line: usize) -> usize {
        let slice = self.rope.line(line);
        let n = slice.len_chars();
        if n > 0 && slice.char(n - 1) == '\n' { n - 1 } else { n }
    }

    fn char_index(&self, pos: TextPos) -> usize {
        if pos.line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(pos.line) + pos.column.min(self.line_len(pos.line))
    }

    fn touch(&mut self) {
        self.tags.clear();
        self.changed = true;
    }
}

impl TextArea for MemoryTextArea {
    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.writes += 1;
        self.touch();
    }

    fn tag_range(&mut self, tag: &str, start: TextPos, end: TextPos) {
        let range = self.char_index(start)..self.char_index(end);
        self.tags.entry(tag.to_string()).or_default().push(range);
    }

    fn clear_tag(&mut self, tag: &str) {
        self.tags.remove(tag);
    }

    fn take_content_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_text_raises_change_once() {
        let mut area = MemoryTextArea::new();
        assert!(!area.take_content_changed());
        area.set_text("a\nb");
        assert!(area.take_content_changed());
        assert!(!area.take_content_changed());
        assert_eq!(area.write_count(), 1);
    }

    #[test]
    fn tags_cover_line_spans() {
        let mut area = MemoryTextArea::with_text("first\nsecond line\nthird");
        area.tag_range("incorrect", TextPos::new(1, 0), TextPos::new(1, 11));
        assert_eq!(area.tagged_lines("incorrect"), vec![1]);
        assert_eq!(area.tag_ranges("incorrect"), &[6..17]);
        area.clear_tag("incorrect");
        assert!(area.tagged_lines("incorrect").is_empty());
    }

    #[test]
    fn columns_clamp_to_line_end() {
        let mut area = MemoryTextArea::with_text("ab\ncd");
        area.tag_range("t", TextPos::new(0, 0), TextPos::new(0, 99));
        assert_eq!(area.tag_ranges("t"), &[0..2]);
    }

    #[test]
    fn carriage_return_is_not_a_line_break() {
        let area = MemoryTextArea::with_text("a\rb\nc");
        assert_eq!(area.line_count(), 2);
        assert_eq!(area.line_text(0), "a\rb");
    }

    #[test]
    fn user_edits() {
        let mut area = MemoryTextArea::with_text("one\ntwo\nthree");
        area.edit_line(1, "TWO");
        assert_eq!(area.text(), "one\nTWO\nthree");
        area.insert_line(0, "zero");
        assert_eq!(area.text(), "zero\none\nTWO\nthree");
        area.insert_line(10, "four");
        assert_eq!(area.text(), "zero\none\nTWO\nthree\nfour");
        area.remove_line(4);
        assert_eq!(area.text(), "zero\none\nTWO\nthree");
        area.remove_line(1);
        assert_eq!(area.text(), "zero\nTWO\nthree");
        assert!(area.take_content_changed());
        assert_eq!(area.write_count(), 0);
    }
}
