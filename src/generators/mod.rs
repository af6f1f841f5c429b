pub mod glyph;
pub mod row;

pub use glyph::Glyph;
pub use row::PDF417Row;
