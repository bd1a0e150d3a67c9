//! Workbook-scoped style registry
//!
//! XLSX keeps one style sheet per package, split into component tables
//! (fonts, fills, borders) plus composite cell records that reference the
//! components by index. The registry mirrors that layout directly so the
//! writer can emit it without remapping.
//!
//! The consuming application requires a fixed table prefix: fill 0 must be
//! "no fill", fill 1 the gray125 placeholder, and border 0 the empty
//! border. The constructor seeds those slots before accepting caller
//! registrations; they cannot be altered or removed.

use super::{Alignment, Border, Fill, Font, PatternType};
use crate::error::{Error, Result};
use ahash::AHashMap;

/// A composite cell style: component ids plus optional alignment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CellStyle {
    /// Index into the font table
    pub font: u32,
    /// Index into the fill table
    pub fill: u32,
    /// Index into the border table
    pub border: u32,
    /// Optional alignment
    pub alignment: Option<Alignment>,
}

/// Deduplicating registry for fonts, fills, borders, and cell styles
#[derive(Debug)]
pub struct StyleRegistry {
    fonts: Vec<Font>,
    font_ids: AHashMap<Font, u32>,
    fills: Vec<Fill>,
    fill_ids: AHashMap<Fill, u32>,
    borders: Vec<Border>,
    border_ids: AHashMap<Border, u32>,
    styles: Vec<CellStyle>,
    style_ids: AHashMap<CellStyle, u32>,
}

impl StyleRegistry {
    /// Create a registry seeded with the mandatory default entries
    pub fn new() -> Self {
        let mut reg = Self {
            fonts: Vec::with_capacity(8),
            font_ids: AHashMap::with_capacity(8),
            fills: Vec::with_capacity(8),
            fill_ids: AHashMap::with_capacity(8),
            borders: Vec::with_capacity(8),
            border_ids: AHashMap::with_capacity(8),
            styles: Vec::with_capacity(16),
            style_ids: AHashMap::with_capacity(16),
        };

        // Font 0: default font
        let default_font = Font::default();
        reg.font_ids.insert(default_font.clone(), 0);
        reg.fonts.push(default_font);

        // Fills 0 and 1: reserved slots (none, gray125)
        reg.fill_ids.insert(Fill::None, 0);
        reg.fills.push(Fill::None);
        reg.fill_ids.insert(Fill::gray125(), 1);
        reg.fills.push(Fill::gray125());

        // Border 0: empty border
        reg.border_ids.insert(Border::default(), 0);
        reg.borders.push(Border::default());

        // Cell style 0: all defaults
        reg.style_ids.insert(CellStyle::default(), 0);
        reg.styles.push(CellStyle::default());

        reg
    }

    /// Register a font, returning its id
    ///
    /// Structurally equal fonts share an id. Fails with
    /// [`Error::InvalidStyleSpec`] on a non-positive or non-finite size or
    /// an empty name.
    pub fn register_font(&mut self, font: Font) -> Result<u32> {
        if !font.size.is_finite() || font.size <= 0.0 {
            return Err(Error::InvalidStyleSpec(format!(
                "font size must be positive, got {}",
                font.size
            )));
        }
        if font.name.is_empty() {
            return Err(Error::InvalidStyleSpec("font name cannot be empty".into()));
        }

        if let Some(&id) = self.font_ids.get(&font) {
            return Ok(id);
        }
        let id = self.fonts.len() as u32;
        self.font_ids.insert(font.clone(), id);
        self.fonts.push(font);
        Ok(id)
    }

    /// Register a fill, returning its id
    ///
    /// Fails with [`Error::InvalidStyleSpec`] for a pattern fill whose
    /// pattern type is `None` (use [`Fill::None`] for "no fill").
    pub fn register_fill(&mut self, fill: Fill) -> Result<u32> {
        if let Fill::Pattern {
            pattern: PatternType::None,
            ..
        } = fill
        {
            return Err(Error::InvalidStyleSpec(
                "pattern fill requires a pattern type".into(),
            ));
        }

        if let Some(&id) = self.fill_ids.get(&fill) {
            return Ok(id);
        }
        let id = self.fills.len() as u32;
        self.fill_ids.insert(fill.clone(), id);
        self.fills.push(fill);
        Ok(id)
    }

    /// Register a border, returning its id
    pub fn register_border(&mut self, border: Border) -> Result<u32> {
        if let Some(&id) = self.border_ids.get(&border) {
            return Ok(id);
        }
        let id = self.borders.len() as u32;
        self.border_ids.insert(border, id);
        self.borders.push(border);
        Ok(id)
    }

    /// Register a composite cell style, returning its id
    ///
    /// Component ids must already exist in their tables; fails with
    /// [`Error::InvalidStyleSpec`] otherwise.
    pub fn register_style(
        &mut self,
        font: u32,
        fill: u32,
        border: u32,
        alignment: Option<Alignment>,
    ) -> Result<u32> {
        if font as usize >= self.fonts.len() {
            return Err(Error::InvalidStyleSpec(format!(
                "font id {} is not registered",
                font
            )));
        }
        if fill as usize >= self.fills.len() {
            return Err(Error::InvalidStyleSpec(format!(
                "fill id {} is not registered",
                fill
            )));
        }
        if border as usize >= self.borders.len() {
            return Err(Error::InvalidStyleSpec(format!(
                "border id {} is not registered",
                border
            )));
        }

        let style = CellStyle {
            font,
            fill,
            border,
            alignment,
        };

        if let Some(&id) = self.style_ids.get(&style) {
            return Ok(id);
        }
        let id = self.styles.len() as u32;
        self.style_ids.insert(style.clone(), id);
        self.styles.push(style);
        Ok(id)
    }

    /// Check whether a composite style id exists
    pub fn contains_style(&self, id: u32) -> bool {
        (id as usize) < self.styles.len()
    }

    /// Get a composite style by id
    pub fn style(&self, id: u32) -> Option<&CellStyle> {
        self.styles.get(id as usize)
    }

    /// Get a font by id
    pub fn font(&self, id: u32) -> Option<&Font> {
        self.fonts.get(id as usize)
    }

    /// Get a fill by id
    pub fn fill(&self, id: u32) -> Option<&Fill> {
        self.fills.get(id as usize)
    }

    /// Get a border by id
    pub fn border(&self, id: u32) -> Option<&Border> {
        self.borders.get(id as usize)
    }

    /// All fonts in id order
    pub fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    /// All fills in id order
    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    /// All borders in id order
    pub fn borders(&self) -> &[Border] {
        &self.borders
    }

    /// All composite styles in id order
    pub fn styles(&self) -> &[CellStyle] {
        &self.styles
    }

    /// Number of composite styles
    pub fn style_count(&self) -> usize {
        self.styles.len()
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{BorderEdge, Color};

    #[test]
    fn test_seeded_defaults() {
        let reg = StyleRegistry::new();

        assert_eq!(reg.fonts().len(), 1);
        assert_eq!(reg.fills().len(), 2);
        assert_eq!(reg.borders().len(), 1);
        assert_eq!(reg.style_count(), 1);

        assert_eq!(reg.fill(0), Some(&Fill::None));
        assert_eq!(reg.fill(1), Some(&Fill::gray125()));
        assert!(reg.border(0).unwrap().is_empty());
        assert_eq!(reg.style(0), Some(&CellStyle::default()));
    }

    #[test]
    fn test_component_dedup() {
        let mut reg = StyleRegistry::new();

        let bold = Font::new().bold(true);
        let a = reg.register_font(bold.clone()).unwrap();
        let b = reg.register_font(bold).unwrap();
        assert_eq!(a, b);
        assert_eq!(reg.fonts().len(), 2);

        // Re-registering a seeded entry returns the seeded id
        assert_eq!(reg.register_fill(Fill::None).unwrap(), 0);
        assert_eq!(reg.register_fill(Fill::gray125()).unwrap(), 1);
        assert_eq!(reg.register_border(Border::default()).unwrap(), 0);
    }

    #[test]
    fn test_style_dedup() {
        let mut reg = StyleRegistry::new();

        let font = reg.register_font(Font::new().bold(true)).unwrap();
        let border = reg
            .register_border(Border::outline(BorderEdge::thin()))
            .unwrap();

        let a = reg
            .register_style(font, 0, border, Some(Alignment::center()))
            .unwrap();
        let b = reg
            .register_style(font, 0, border, Some(Alignment::center()))
            .unwrap();
        let c = reg.register_style(font, 0, border, None).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(reg.style_count(), 3);
    }

    #[test]
    fn test_invalid_font_spec() {
        let mut reg = StyleRegistry::new();

        assert!(matches!(
            reg.register_font(Font::new().size(-1.0)),
            Err(Error::InvalidStyleSpec(_))
        ));
        assert!(matches!(
            reg.register_font(Font::new().size(f64::NAN)),
            Err(Error::InvalidStyleSpec(_))
        ));
        assert!(matches!(
            reg.register_font(Font::new().name("")),
            Err(Error::InvalidStyleSpec(_))
        ));
    }

    #[test]
    fn test_invalid_fill_spec() {
        let mut reg = StyleRegistry::new();

        let bad = Fill::pattern(PatternType::None, Color::Auto, Color::Auto);
        assert!(matches!(
            reg.register_fill(bad),
            Err(Error::InvalidStyleSpec(_))
        ));
    }

    #[test]
    fn test_unregistered_component_ids() {
        let mut reg = StyleRegistry::new();

        assert!(matches!(
            reg.register_style(5, 0, 0, None),
            Err(Error::InvalidStyleSpec(_))
        ));
        assert!(matches!(
            reg.register_style(0, 9, 0, None),
            Err(Error::InvalidStyleSpec(_))
        ));
        assert!(matches!(
            reg.register_style(0, 0, 3, None),
            Err(Error::InvalidStyleSpec(_))
        ));
    }
}
