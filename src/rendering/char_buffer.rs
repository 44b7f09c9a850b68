/// Character buffer for terminal rendering
/// One glyph per pixel, stored row-major
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharBuffer {
    // Hot data: used for every bounds check and index calculation
    pub width: usize,
    pub height: usize,
    pub glyphs: Vec<char>,
}

impl CharBuffer {
    pub fn new(width: usize, height: usize, fill: char) -> Self {
        Self {
            width,
            height,
            glyphs: vec![fill; width * height],
        }
    }

    /// Out-of-range writes are ignored
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, glyph: char) {
        if x < self.width && y < self.height {
            self.glyphs[y * self.width + x] = glyph;
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.glyphs[y * self.width + x])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.glyphs.chunks(self.width.max(1))
    }

    /// Each row as a String, ready to hand to a terminal
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows().map(|row| row.iter().collect())
    }

    pub fn count(&self, glyph: char) -> usize {
        self.glyphs.iter().filter(|&&g| g == glyph).count()
    }

    pub fn resize(&mut self, width: usize, height: usize, fill: char) {
        self.width = width;
        self.height = height;
        self.glyphs.clear();
        self.glyphs.resize(width * height, fill);
    }
}

impl fmt::Display for CharBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(&line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_respect_bounds() {
        let mut buffer = CharBuffer::new(3, 2, '.');
        buffer.set(2, 1, '#');
        buffer.set(3, 0, '!');
        assert_eq!(buffer.get(2, 1), Some('#'));
        assert_eq!(buffer.get(3, 0), None);
        assert_eq!(buffer.count('!'), 0);
        assert_eq!(buffer.to_string(), "...\n..#");
    }

    #[test]
    fn resize_refills() {
        let mut buffer = CharBuffer::new(2, 2, 'x');
        buffer.resize(4, 1, ' ');
        assert_eq!(buffer.glyphs.len(), 4);
        assert_eq!(buffer.count(' '), 4);
    }
}
