use serde::{Deserialize, Serialize};

/// Accessibility-driven discrete text-scale setting.
///
/// A styled-text builder resolves the same abstract style description into
/// different concrete runs per category; the render cache keys storage per
/// category so that switching the active category never reuses stale glyph
/// geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextScaleCategory {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
    ExtraExtraLarge,
    AccessibilityLarge,
    AccessibilityExtraLarge,
}

impl TextScaleCategory {
    /// Multiplier applied to base font sizes for this category.
    pub fn scale_factor(self) -> f32 {
        match self {
            TextScaleCategory::Small => 0.85,
            TextScaleCategory::Medium => 1.0,
            TextScaleCategory::Large => 1.15,
            TextScaleCategory::ExtraLarge => 1.3,
            TextScaleCategory::ExtraExtraLarge => 1.5,
            TextScaleCategory::AccessibilityLarge => 1.75,
            TextScaleCategory::AccessibilityExtraLarge => 2.0,
        }
    }
}
