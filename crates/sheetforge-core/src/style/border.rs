//! Border component of a cell style

use super::Color;

/// Line style of a single border edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderLineStyle {
    /// No line
    #[default]
    None,
    /// Thin line
    Thin,
    /// Medium line
    Medium,
    /// Thick line
    Thick,
    /// Dashed line
    Dashed,
    /// Dotted line
    Dotted,
    /// Double line
    Double,
    /// Hair line (thinner than thin)
    Hair,
}

/// One edge of a border: a line style plus its color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BorderEdge {
    pub style: BorderLineStyle,
    pub color: Color,
}

impl BorderEdge {
    pub fn new(style: BorderLineStyle, color: Color) -> Self {
        Self { style, color }
    }

    /// Thin black edge, the most common grid line
    pub fn thin() -> Self {
        Self::new(BorderLineStyle::Thin, Color::BLACK)
    }
}

/// Border record referenced by composite cell styles
///
/// Each side is an independent optional edge; an unset side draws nothing.
/// The all-unset value is the empty border the registry seeds at index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Border {
    pub left: Option<BorderEdge>,
    pub right: Option<BorderEdge>,
    pub top: Option<BorderEdge>,
    pub bottom: Option<BorderEdge>,
    pub diagonal: Option<BorderEdge>,
}

impl Border {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the same edge on all four outline sides
    pub fn outline(edge: BorderEdge) -> Self {
        Self {
            left: Some(edge),
            right: Some(edge),
            top: Some(edge),
            bottom: Some(edge),
            diagonal: None,
        }
    }

    pub fn left(mut self, edge: BorderEdge) -> Self {
        self.left = Some(edge);
        self
    }

    pub fn right(mut self, edge: BorderEdge) -> Self {
        self.right = Some(edge);
        self
    }

    pub fn top(mut self, edge: BorderEdge) -> Self {
        self.top = Some(edge);
        self
    }

    pub fn bottom(mut self, edge: BorderEdge) -> Self {
        self.bottom = Some(edge);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none()
            && self.right.is_none()
            && self.top.is_none()
            && self.bottom.is_none()
            && self.diagonal.is_none()
    }
}
