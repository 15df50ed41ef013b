use crate::Color;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::ops::Range;

/// Visual attributes attached to a span of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAttributes {
    pub family: String,
    pub size: f32,
    pub color: Color,
    #[serde(default)]
    pub bold: bool,
}

impl Eq for TextAttributes {}

impl Hash for TextAttributes {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family.hash(state);
        self.size.to_bits().hash(state);
        self.color.hash(state);
        self.bold.hash(state);
    }
}

impl Default for TextAttributes {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 14.0,
            color: Color::BLACK,
            bold: false,
        }
    }
}

/// A byte range of the text with one set of attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyledSpan {
    pub range: Range<usize>,
    pub attributes: TextAttributes,
}

/// Immutable text plus its per-span style attributes, independent of any
/// rendering width or bitmap scale.
///
/// Structurally hashable: the render cache derives its content fingerprint
/// from the text and spans rather than from object identity, so two runs
/// with identical content share cache entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyledTextRun {
    pub text: String,
    pub spans: Vec<StyledSpan>,
}

impl StyledTextRun {
    /// A run whose whole text carries a single set of attributes.
    pub fn plain(text: impl Into<String>, attributes: TextAttributes) -> Self {
        let text = text.into();
        let len = text.len();
        Self {
            text,
            spans: vec![StyledSpan {
                range: 0..len,
                attributes,
            }],
        }
    }

    /// Attributes of the span covering the given byte index, if any.
    pub fn attributes_at(&self, index: usize) -> Option<&TextAttributes> {
        self.spans
            .iter()
            .find(|span| span.range.contains(&index))
            .map(|span| &span.attributes)
    }

    /// A copy with every font size multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        let spans = self
            .spans
            .iter()
            .map(|span| StyledSpan {
                range: span.range.clone(),
                attributes: TextAttributes {
                    size: span.attributes.size * factor,
                    ..span.attributes.clone()
                },
            })
            .collect();
        Self {
            text: self.text.clone(),
            spans,
        }
    }
}
