/// Maps per-pixel hit records to glyphs
use super::CharBuffer;
use crate::config::GlyphConfig;
use crate::raycast::{HitGrid, HitRecord};

pub struct Renderer {
    pub background: char,
    pub edge: char,
    pub highlight: char,
}

impl Renderer {
    pub fn new(glyphs: &GlyphConfig) -> Self {
        Self {
            background: glyphs.background,
            edge: glyphs.edge,
            highlight: glyphs.highlight,
        }
    }

    /// Render into a fresh buffer.
    pub fn render(&self, hits: &HitGrid, target: Option<&HitRecord>) -> CharBuffer {
        let mut buffer = CharBuffer::new(hits.width(), hits.height(), self.background);
        self.render_into(hits, target, &mut buffer);
        buffer
    }

    /// Render reusing `buffer`'s allocation. Every pixel whose ray hit the
    /// target cell shows the highlight glyph instead of its own.
    pub fn render_into(&self, hits: &HitGrid, target: Option<&HitRecord>, buffer: &mut CharBuffer) {
        if buffer.width != hits.width() || buffer.height != hits.height() {
            buffer.resize(hits.width(), hits.height(), self.background);
        }
        let target_cell = target.map(|t| t.cell);

        for (row, records) in hits.rows().enumerate() {
            for (col, record) in records.iter().enumerate() {
                let glyph = match record {
                    None => self.background,
                    Some(hit) if Some(hit.cell) == target_cell => self.highlight,
                    Some(hit) => hit.glyph(self.edge),
                };
                buffer.set(col, row, glyph);
            }
        }
    }
}
