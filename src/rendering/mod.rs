/// Character-grid rendering
/// Hit records in, glyphs out
pub mod char_buffer;
pub mod renderer;

pub use char_buffer::CharBuffer;
pub use renderer::Renderer;
