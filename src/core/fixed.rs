// src/core/fixed.rs
// Character-addressed view over one fixed-width line.
// Offsets count chars, not bytes: owner names carry Ñ/Á and must not shift
// the fields after them. Spans past the end clamp to the line end.

use crate::config::Span;

pub struct FixedLine<'a> {
    text: &'a str,
    // Byte offset of every char start, plus text.len(). None for ASCII lines,
    // where char and byte offsets coincide.
    bounds: Option<Vec<usize>>,
}

impl<'a> FixedLine<'a> {
    pub fn new(text: &'a str) -> Self {
        let bounds = if text.is_ascii() {
            None
        } else {
            let mut b: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
            b.push(text.len());
            Some(b)
        };
        Self { text, bounds }
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        match &self.bounds {
            None => self.text.len(),
            Some(b) => b.len() - 1,
        }
    }

    pub fn is_empty(&self) -> bool { self.text.is_empty() }

    #[inline]
    fn byte_at(&self, char_pos: usize) -> usize {
        let pos = char_pos.min(self.len());
        match &self.bounds {
            None => pos,
            Some(b) => b[pos],
        }
    }

    /// Raw slice, untrimmed.
    pub fn slice(&self, span: Span) -> &'a str {
        let start = self.byte_at(span.start());
        let end = self.byte_at(span.end()).max(start);
        &self.text[start..end]
    }

    /// Trimmed slice; what every text field is stored as.
    pub fn field(&self, span: Span) -> &'a str {
        self.slice(span).trim()
    }

    /// Everything from `from` to the end of the line, trimmed.
    pub fn tail(&self, from: usize) -> &'a str {
        self.text[self.byte_at(from)..].trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_slices_clamp() {
        let l = FixedLine::new("0814100  JUAN");
        assert_eq!(l.len(), 13);
        assert_eq!(l.slice(Span(0, 5)), "08141");
        assert_eq!(l.field(Span(5, 9)), "00");
        assert_eq!(l.field(Span(9, 40)), "JUAN");
        assert_eq!(l.slice(Span(40, 50)), "");
        assert_eq!(l.tail(99), "");
    }

    #[test]
    fn multibyte_chars_count_once() {
        let l = FixedLine::new("AB NUÑEZ  PEÑA 123");
        assert_eq!(l.len(), 18);
        assert_eq!(l.field(Span(3, 8)), "NUÑEZ");
        assert_eq!(l.field(Span(10, 14)), "PEÑA");
        assert_eq!(l.tail(15), "123");
    }

    #[test]
    fn inverted_span_is_empty() {
        let l = FixedLine::new("abcdef");
        assert_eq!(l.slice(Span(4, 2)), "");
    }
}
