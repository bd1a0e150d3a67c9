//! Shared-string table and rich text
//!
//! The XLSX format keeps one deduplicated string table per package; every
//! worksheet references entries by index. [`StringPool`] is that table:
//! grow-only, insertion-ordered, with hash-based deduplication. Entry
//! order is stable because it is part of the emitted file's layout.

use crate::style::Color;
use ahash::AHashMap;

/// Formatting applied to a single rich-text run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunStyle {
    /// Bold
    pub bold: bool,
    /// Font size in points
    pub size: Option<f64>,
    /// Font color
    pub color: Option<Color>,
    /// Font family name
    pub font_name: Option<String>,
}

impl RunStyle {
    /// Create an empty run style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set font size in points
    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set font color
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set font name
    pub fn font_name<S: Into<String>>(mut self, name: S) -> Self {
        self.font_name = Some(name.into());
        self
    }
}

impl std::hash::Hash for RunStyle {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.bold.hash(state);
        self.size.map(f64::to_bits).hash(state);
        self.color.hash(state);
        self.font_name.hash(state);
    }
}

impl Eq for RunStyle {}

/// One run of text with optional formatting
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextRun {
    /// Run text
    pub text: String,
    /// Run formatting (None = inherit the cell's font)
    pub style: Option<RunStyle>,
}

/// Text content of a shared-string entry or an inline rich-text cell
///
/// A plain string is a `RichText` with exactly one unformatted run; the
/// two forms share the same shared-string slot, so they are one type
/// rather than two.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RichText {
    runs: Vec<TextRun>,
}

impl RichText {
    /// Create an empty rich text value
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a plain (single unformatted run) value
    pub fn plain<S: Into<String>>(text: S) -> Self {
        Self {
            runs: vec![TextRun {
                text: text.into(),
                style: None,
            }],
        }
    }

    /// Append an unformatted run
    pub fn run<S: Into<String>>(mut self, text: S) -> Self {
        self.runs.push(TextRun {
            text: text.into(),
            style: None,
        });
        self
    }

    /// Append a formatted run
    pub fn styled_run<S: Into<String>>(mut self, text: S, style: RunStyle) -> Self {
        self.runs.push(TextRun {
            text: text.into(),
            style: Some(style),
        });
        self
    }

    /// The runs in order
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// True when this is a single unformatted run
    pub fn is_plain(&self) -> bool {
        self.runs.len() == 1 && self.runs[0].style.is_none()
    }

    /// Concatenated text of all runs
    pub fn to_plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

impl From<&str> for RichText {
    fn from(s: &str) -> Self {
        RichText::plain(s)
    }
}

impl From<String> for RichText {
    fn from(s: String) -> Self {
        RichText::plain(s)
    }
}

/// Workbook-scoped shared-string table
///
/// Entries are deduplicated by structural equality (including run
/// formatting) and never removed; `intern` returns a stable 0-based index
/// usable from any worksheet in the workbook.
#[derive(Debug, Default)]
pub struct StringPool {
    /// All distinct entries, in insertion order
    entries: Vec<RichText>,
    /// Fast lookup for deduplication
    index_map: AHashMap<EntryKey, u32>,
}

/// Key for entry lookup (hash-based)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EntryKey(u64);

impl EntryKey {
    fn from_entry(entry: &RichText) -> Self {
        use std::hash::{Hash, Hasher};
        let mut hasher = ahash::AHasher::default();
        entry.hash(&mut hasher);
        EntryKey(hasher.finish())
    }
}

impl StringPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or insert an entry, returning its index
    ///
    /// If an equal entry already exists, returns its index. Otherwise,
    /// appends the entry and returns the new index.
    pub fn intern<T: Into<RichText>>(&mut self, entry: T) -> u32 {
        let entry = entry.into();
        let key = EntryKey::from_entry(&entry);

        if let Some(&idx) = self.index_map.get(&key) {
            // Equal hashes can still be a collision; compare for real
            if self.entries[idx as usize] == entry {
                return idx;
            }
        }

        let idx = self.entries.len() as u32;
        self.index_map.insert(key, idx);
        self.entries.push(entry);
        idx
    }

    /// Get an entry by index
    pub fn get(&self, index: u32) -> Option<&RichText> {
        self.entries.get(index as usize)
    }

    /// Number of distinct entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the pool has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[RichText] {
        &self.entries
    }

    /// Iterate over all entries with their indices
    pub fn iter(&self) -> impl Iterator<Item = (u32, &RichText)> {
        self.entries.iter().enumerate().map(|(i, e)| (i as u32, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_intern_idempotent() {
        let mut pool = StringPool::new();

        let a = pool.intern("Name");
        let b = pool.intern("Name");
        assert_eq!(a, b);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_intern_preserves_insertion_order() {
        let mut pool = StringPool::new();

        let texts = ["No.", "Name", "Class", "Tutor", "Age"];
        for (i, t) in texts.iter().enumerate() {
            assert_eq!(pool.intern(*t), i as u32);
        }

        assert_eq!(pool.len(), texts.len());
        for (i, t) in texts.iter().enumerate() {
            assert_eq!(pool.get(i as u32).unwrap().to_plain_text(), *t);
        }
    }

    #[test]
    fn test_rich_entries_distinct_from_plain() {
        let mut pool = StringPool::new();

        let plain = pool.intern("Rate (%)");
        let rich = pool.intern(
            RichText::new()
                .run("Rate (")
                .styled_run("%", RunStyle::new().bold(true))
                .run(")"),
        );
        assert_ne!(plain, rich);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_rich_dedup_includes_run_style() {
        let mut pool = StringPool::new();

        let a = pool.intern(RichText::new().styled_run("x", RunStyle::new().size(11.0)));
        let b = pool.intern(RichText::new().styled_run("x", RunStyle::new().size(11.0)));
        let c = pool.intern(RichText::new().styled_run("x", RunStyle::new().size(12.0)));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_plain_is_single_unstyled_run() {
        let rt = RichText::plain("hello");
        assert!(rt.is_plain());
        assert_eq!(rt.runs().len(), 1);
        assert_eq!(rt.to_plain_text(), "hello");

        let rich = RichText::new().run("a").run("b");
        assert!(!rich.is_plain());
        assert_eq!(rich.to_plain_text(), "ab");
    }
}
