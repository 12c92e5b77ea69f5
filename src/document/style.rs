//! Inline style vocabulary
//!
//! Inline styles are named attributes applied per character, independent of
//! the block type. The set is fixed; renderers map each name to concrete
//! styling (see `presentation`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named inline style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Code,
    /// Accent colour, rendered as red foreground text
    Red,
}

impl InlineStyle {
    /// Every style, in bit order
    pub const ALL: [InlineStyle; 5] = [
        InlineStyle::Bold,
        InlineStyle::Italic,
        InlineStyle::Underline,
        InlineStyle::Code,
        InlineStyle::Red,
    ];

    /// Name used by the renderer and in key commands
    pub fn as_str(&self) -> &'static str {
        match self {
            InlineStyle::Bold => "BOLD",
            InlineStyle::Italic => "ITALIC",
            InlineStyle::Underline => "UNDERLINE",
            InlineStyle::Code => "CODE",
            InlineStyle::Red => "RED",
        }
    }

    fn bit(self) -> u8 {
        match self {
            InlineStyle::Bold => 1,
            InlineStyle::Italic => 1 << 1,
            InlineStyle::Underline => 1 << 2,
            InlineStyle::Code => 1 << 3,
            InlineStyle::Red => 1 << 4,
        }
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InlineStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InlineStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| format!("unknown inline style: {}", s))
    }
}

/// The set of inline styles carried by one character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StyleSet(u8);

impl StyleSet {
    /// Set with no styles
    pub fn empty() -> Self {
        Self(0)
    }

    /// Set containing a single style
    pub fn only(style: InlineStyle) -> Self {
        Self(style.bit())
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, style: InlineStyle) -> bool {
        self.0 & style.bit() != 0
    }

    /// Copy of this set with `style` added
    pub fn with(self, style: InlineStyle) -> Self {
        Self(self.0 | style.bit())
    }

    /// Copy of this set with `style` removed
    pub fn without(self, style: InlineStyle) -> Self {
        Self(self.0 & !style.bit())
    }

    /// Copy of this set with `style` flipped
    pub fn toggled(self, style: InlineStyle) -> Self {
        if self.contains(style) {
            self.without(style)
        } else {
            self.with(style)
        }
    }

    /// Iterate the styles in this set
    pub fn iter(&self) -> impl Iterator<Item = InlineStyle> + '_ {
        InlineStyle::ALL
            .into_iter()
            .filter(move |style| self.contains(*style))
    }
}

impl FromIterator<InlineStyle> for StyleSet {
    fn from_iter<I: IntoIterator<Item = InlineStyle>>(iter: I) -> Self {
        iter.into_iter().fold(StyleSet::empty(), StyleSet::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_names_roundtrip() {
        for style in InlineStyle::ALL {
            assert_eq!(style.as_str().parse::<InlineStyle>(), Ok(style));
        }
        assert!("STRIKETHROUGH".parse::<InlineStyle>().is_err());
    }

    #[test]
    fn test_style_set_toggle() {
        let set = StyleSet::only(InlineStyle::Bold);
        assert!(set.contains(InlineStyle::Bold));

        let set = set.toggled(InlineStyle::Red).toggled(InlineStyle::Bold);
        assert!(!set.contains(InlineStyle::Bold));
        assert!(set.contains(InlineStyle::Red));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![InlineStyle::Red]);
    }

    #[test]
    fn test_serde_uses_uppercase_names() {
        let json = serde_json::to_string(&InlineStyle::Underline).unwrap();
        assert_eq!(json, "\"UNDERLINE\"");
    }
}
