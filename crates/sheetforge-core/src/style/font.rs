//! Font component of a cell style

use super::Color;

/// Font record referenced by composite cell styles
///
/// Builder setters are named after the fields, like
/// [`RunStyle`](crate::strings::RunStyle): `Font::new().bold(true).size(12.0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Family name ("Calibri", "Arial", ...)
    pub name: String,
    /// Size in points
    pub size: f64,
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Text color
    pub color: Color,
}

impl Default for Font {
    fn default() -> Self {
        // Matches the implicit font the consuming application assumes for
        // unstyled cells
        Self {
            name: "Calibri".to_string(),
            size: 11.0,
            bold: false,
            italic: false,
            color: Color::Auto,
        }
    }
}

impl Font {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn size(mut self, points: f64) -> Self {
        self.size = points;
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

// Size is an f64, so Hash and Eq go through to_bits. The registry rejects
// non-finite sizes before a Font ever lands in a table.
impl std::hash::Hash for Font {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.size.to_bits().hash(state);
        self.bold.hash(state);
        self.italic.hash(state);
        self.color.hash(state);
    }
}

impl Eq for Font {}
