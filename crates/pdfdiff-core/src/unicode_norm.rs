//! Unicode normalization of fragment text before comparison.
//!
//! Two independently generated versions of a document may encode the same
//! visible word differently (composed vs. decomposed accents, ligatures).
//! [`UnicodeNorm`] selects a form that both sides are folded into so that
//! equal-looking tokens compare equal in the matcher.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

/// Unicode normalization form applied to fragment text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UnicodeNorm {
    /// Compare text exactly as extracted (default).
    #[default]
    None,
    /// Canonical Decomposition, followed by Canonical Composition (NFC).
    Nfc,
    /// Canonical Decomposition (NFD).
    Nfd,
    /// Compatibility Decomposition, followed by Canonical Composition (NFKC).
    Nfkc,
    /// Compatibility Decomposition (NFKD).
    Nfkd,
}

impl UnicodeNorm {
    /// Apply this normalization form to `text`.
    ///
    /// Borrows the input when normalization is `None`.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            UnicodeNorm::None => Cow::Borrowed(text),
            UnicodeNorm::Nfc => Cow::Owned(text.nfc().collect()),
            UnicodeNorm::Nfd => Cow::Owned(text.nfd().collect()),
            UnicodeNorm::Nfkc => Cow::Owned(text.nfkc().collect()),
            UnicodeNorm::Nfkd => Cow::Owned(text.nfkd().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_borrows_input() {
        let out = UnicodeNorm::None.apply("e\u{0301}");
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, "e\u{0301}");
    }

    #[test]
    fn test_nfc_composes() {
        assert_eq!(UnicodeNorm::Nfc.apply("e\u{0301}"), "\u{00E9}");
    }

    #[test]
    fn test_nfd_decomposes() {
        assert_eq!(UnicodeNorm::Nfd.apply("\u{00E9}"), "e\u{0301}");
    }

    #[test]
    fn test_nfkc_expands_ligature() {
        assert_eq!(UnicodeNorm::Nfkc.apply("\u{FB01}nd"), "find");
    }

    #[test]
    fn test_nfkd_expands_ligature() {
        assert_eq!(UnicodeNorm::Nfkd.apply("\u{FB00}"), "ff");
    }

    #[test]
    fn test_default_is_none() {
        assert_eq!(UnicodeNorm::default(), UnicodeNorm::None);
    }
}
