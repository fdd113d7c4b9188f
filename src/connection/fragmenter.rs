//! Chunking of encoded frames into transport-sized messages.

/// Iterator that splits encoded frame text into transport messages.
///
/// Each chunk is at most `max_size` bytes and ends on a char boundary, so
/// every chunk is valid text on its own. A single char wider than
/// `max_size` is emitted whole. Concatenating the chunks yields the input.
pub struct ChunkSplitter<'a> {
    text: &'a str,
    max_size: usize,
    offset: usize,
}

impl<'a> ChunkSplitter<'a> {
    /// Create a splitter for the given text.
    #[inline]
    #[must_use]
    pub fn new(text: &'a str, max_size: usize) -> Self {
        Self {
            text,
            max_size: max_size.max(1),
            offset: 0,
        }
    }

    /// Check if the text needs more than one transport message.
    #[inline]
    #[must_use]
    pub fn needs_chunking(&self) -> bool {
        self.text.len() > self.max_size
    }

    /// Bytes not yet yielded.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.text.len().saturating_sub(self.offset)
    }
}

impl<'a> Iterator for ChunkSplitter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.text.len() {
            return None;
        }

        let rest = &self.text[self.offset..];
        let mut end = rest.len().min(self.max_size);
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        if end == 0 {
            end = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }

        self.offset += end;
        Some(&rest[..end])
    }
}
