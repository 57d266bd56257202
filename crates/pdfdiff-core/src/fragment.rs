//! Extractor-facing input types: positioned text fragments and pages.

use crate::geometry::PageSize;

/// Whitespace as the fragment text layer treats it.
///
/// Unicode `White_Space` without NEL (U+0085), plus the zero-width no-break
/// space (U+FEFF) that extractors leave behind from byte-order marks.
pub fn is_text_whitespace(c: char) -> bool {
    match c {
        '\u{FEFF}' => true,
        '\u{0085}' => false,
        c => c.is_whitespace(),
    }
}

/// `text` with leading and trailing [`is_text_whitespace`] removed.
pub fn trim_text(text: &str) -> &str {
    text.trim_matches(is_text_whitespace)
}

/// Whitespace runs collapsed to single spaces, ends trimmed.
pub fn collapse_whitespace(text: &str) -> String {
    text.split(is_text_whitespace)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One span of extracted text on one page of one version.
///
/// Coordinates are in the extractor's native frame. Extents and scales of
/// `0.0` mean "not reported" and are estimated during normalization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextFragment {
    /// The text content of this fragment.
    pub text: String,
    /// Horizontal anchor.
    pub x: f64,
    /// Vertical anchor.
    pub y: f64,
    /// Reported width.
    #[cfg_attr(feature = "serde", serde(default))]
    pub width: f64,
    /// Reported height.
    #[cfg_attr(feature = "serde", serde(default))]
    pub height: f64,
    /// Horizontal text scale (text matrix `a`), used to estimate width.
    #[cfg_attr(feature = "serde", serde(default))]
    pub scale_x: f64,
    /// Vertical text scale (text matrix `d`), used to estimate height.
    #[cfg_attr(feature = "serde", serde(default))]
    pub scale_y: f64,
}

impl TextFragment {
    /// Create a fragment with reported extents and no scale information.
    pub fn new(text: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height,
            scale_x: 0.0,
            scale_y: 0.0,
        }
    }

    /// Create a fragment with a position only; extents are estimated later.
    pub fn at(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(text, x, y, 0.0, 0.0)
    }

    /// Set the text scale, returning the modified fragment (builder pattern).
    pub fn with_scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    /// Returns true if the text is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        trim_text(&self.text).is_empty()
    }
}

/// One page of one version as reported by the extraction collaborator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageText {
    /// Page width of the surface that receives highlights.
    pub width: f64,
    /// Authoritative page height of the surface that receives highlights.
    pub height: f64,
    /// Fragments in extraction order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fragments: Vec<TextFragment>,
}

impl PageText {
    pub fn new(width: f64, height: f64, fragments: Vec<TextFragment>) -> Self {
        Self {
            width,
            height,
            fragments,
        }
    }

    pub fn size(&self) -> PageSize {
        PageSize::new(self.width, self.height)
    }

    /// Raw fragment texts joined with spaces, whitespace runs collapsed and trimmed.
    ///
    /// Two pages with equal keys are treated as unchanged without any
    /// geometric work.
    pub fn text_key(&self) -> String {
        let joined = self
            .fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        collapse_whitespace(&joined)
    }
}

/// An in-memory document: the extracted pages of one version.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentText {
    pub pages: Vec<PageText>,
}

impl DocumentText {
    pub fn new(pages: Vec<PageText>) -> Self {
        Self { pages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_leaves_extents_unreported() {
        let f = TextFragment::at("Alice", 10.0, 20.0);
        assert_eq!(f.width, 0.0);
        assert_eq!(f.height, 0.0);
        assert_eq!(f.scale_x, 0.0);
    }

    #[test]
    fn test_with_scale_sets_both_axes() {
        let f = TextFragment::at("x", 0.0, 0.0).with_scale(12.0, -12.0);
        assert_eq!(f.scale_x, 12.0);
        assert_eq!(f.scale_y, -12.0);
    }

    #[test]
    fn test_blank_detection() {
        assert!(TextFragment::at("  \t", 0.0, 0.0).is_blank());
        assert!(TextFragment::at("", 0.0, 0.0).is_blank());
        assert!(!TextFragment::at(" a ", 0.0, 0.0).is_blank());
    }

    #[test]
    fn test_text_key_collapses_whitespace() {
        let page = PageText::new(
            612.0,
            792.0,
            vec![
                TextFragment::at("Hello ", 0.0, 0.0),
                TextFragment::at(" ", 0.0, 0.0),
                TextFragment::at("\tworld\n", 0.0, 0.0),
            ],
        );
        assert_eq!(page.text_key(), "Hello world");
    }

    #[test]
    fn test_byte_order_mark_is_whitespace() {
        assert!(TextFragment::at("\u{FEFF}", 0.0, 0.0).is_blank());
        assert!(TextFragment::at(" \u{FEFF}\u{00A0}", 0.0, 0.0).is_blank());
        assert_eq!(trim_text("\u{FEFF}Hello\u{3000}"), "Hello");
        assert_eq!(collapse_whitespace("a\u{FEFF}\u{2028}b "), "a b");
    }

    #[test]
    fn test_next_line_is_not_whitespace() {
        assert!(!TextFragment::at("\u{0085}", 0.0, 0.0).is_blank());
        assert_eq!(trim_text("\u{0085}x"), "\u{0085}x");
    }

    #[test]
    fn test_text_key_drops_stray_byte_order_mark() {
        let with_bom = PageText::new(
            612.0,
            792.0,
            vec![TextFragment::at("Hello", 0.0, 0.0), TextFragment::at("\u{FEFF}", 0.0, 0.0)],
        );
        let plain = PageText::new(612.0, 792.0, vec![TextFragment::at("Hello", 0.0, 0.0)]);
        assert_eq!(with_bom.text_key(), plain.text_key());
    }

    #[test]
    fn test_text_key_ignores_fragment_boundaries() {
        let split = PageText::new(
            0.0,
            0.0,
            vec![TextFragment::at("a", 0.0, 0.0), TextFragment::at("b", 0.0, 0.0)],
        );
        let joined = PageText::new(0.0, 0.0, vec![TextFragment::at("a b", 0.0, 0.0)]);
        assert_eq!(split.text_key(), joined.text_key());
    }

    #[test]
    fn test_empty_page_key() {
        assert_eq!(PageText::new(10.0, 10.0, Vec::new()).text_key(), "");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_fragment_extents_default_when_absent() {
        let frag: TextFragment = serde_json::from_str(r#"{"text":"x","x":1.5,"y":2}"#).unwrap();
        assert_eq!(frag, TextFragment::at("x", 1.5, 2.0));
    }
}
