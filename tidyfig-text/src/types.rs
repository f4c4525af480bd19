use std::str::FromStr;

use ordered_float::OrderedFloat;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::VariantNames;

use crate::error::TidyfigTextError;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, VariantNames)]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, VariantNames)]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "snake_case")]
pub enum TextBaseline {
    Alphabetic,
    Top,
    Middle,
    #[default]
    Bottom,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, VariantNames)]
#[cfg_attr(feature = "serde", serde(untagged))]
#[strum(serialize_all = "snake_case")]
pub enum FontWeight {
    Name(FontWeightNameSpec),
    Number(f32),
}

impl FontWeight {
    /// Numeric weights of 600 and above count as bold
    pub fn is_bold(&self) -> bool {
        match self {
            Self::Name(FontWeightNameSpec::Bold) => true,
            Self::Name(FontWeightNameSpec::Normal) => false,
            Self::Number(w) => *w >= 600.0,
        }
    }
}

impl std::hash::Hash for FontWeight {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Self::Name(spec) => spec.hash(state),
            Self::Number(num) => OrderedFloat::from(*num).hash(state),
        }
    }
}

impl Eq for FontWeight {}

impl Default for FontWeight {
    fn default() -> Self {
        Self::Name(FontWeightNameSpec::Normal)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, VariantNames)]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "snake_case")]
pub enum FontWeightNameSpec {
    #[default]
    Normal,
    Bold,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, VariantNames)]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "snake_case")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// One of the four faces of a supported font family
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, VariantNames)]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
pub enum FontFace {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontFace {
    pub const ALL: [FontFace; 4] = [
        FontFace::Regular,
        FontFace::Bold,
        FontFace::Italic,
        FontFace::BoldItalic,
    ];

    /// Classify a PostScript font-name suffix such as `BoldOblique` or `Italic`.
    ///
    /// Italic and Oblique are the same face here.
    pub fn from_postscript_suffix(suffix: &str) -> Self {
        let bold = suffix.contains("Bold");
        let slanted = suffix.contains("Italic") || suffix.contains("Oblique");
        match (bold, slanted) {
            (true, true) => FontFace::BoldItalic,
            (false, true) => FontFace::Italic,
            (true, false) => FontFace::Bold,
            (false, false) => FontFace::Regular,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, FontFace::Bold | FontFace::BoldItalic)
    }
}

impl FromStr for FontFace {
    type Err = TidyfigTextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', ' '], "-").as_str() {
            "regular" | "normal" => Ok(FontFace::Regular),
            "bold" => Ok(FontFace::Bold),
            "italic" | "oblique" => Ok(FontFace::Italic),
            "bold-italic" | "bold-oblique" => Ok(FontFace::BoldItalic),
            _ => Err(TidyfigTextError::UnsupportedFace(s.to_string())),
        }
    }
}
