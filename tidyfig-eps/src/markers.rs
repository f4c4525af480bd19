use tidyfig_text::types::FontFace;

use crate::error::TidyfigEpsError;

/// Comment lines that bracket the regions the rewriter treats specially
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    pub dictionary_start: String,
    pub dictionary_end: String,
    pub reencode_start: String,
    pub reencode_end: String,
    /// Any line containing this is replaced by a fresh bounding box
    pub bounding_box: String,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self {
            dictionary_start: "%%BeginSetup".to_string(),
            dictionary_end: "%%EndSetup".to_string(),
            reencode_start: "%%BeginResource: encoding".to_string(),
            reencode_end: "%%EndResource".to_string(),
            bounding_box: "%%BoundingBox:".to_string(),
        }
    }
}

/// Font family the rewritten file should reference, by PostScript name per face
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFamily {
    pub family: String,
    pub regular: String,
    pub bold: String,
    pub italic: String,
    pub bold_italic: String,
}

impl Default for TargetFamily {
    fn default() -> Self {
        Self::arial()
    }
}

impl TargetFamily {
    pub fn arial() -> Self {
        Self {
            family: "Arial".to_string(),
            regular: "ArialMT".to_string(),
            bold: "Arial-BoldMT".to_string(),
            italic: "Arial-ItalicMT".to_string(),
            bold_italic: "Arial-BoldItalicMT".to_string(),
        }
    }

    /// Family whose faces follow the usual `Name-Bold`/`Name-Italic` naming
    pub fn from_family(family: &str) -> Result<Self, TidyfigEpsError> {
        if family.eq_ignore_ascii_case("arial") {
            return Ok(Self::arial());
        }
        if family.is_empty() || !family.chars().all(is_postscript_name_char) {
            return Err(TidyfigEpsError::InvalidFontName(family.to_string()));
        }
        Ok(Self {
            family: family.to_string(),
            regular: family.to_string(),
            bold: format!("{family}-Bold"),
            italic: format!("{family}-Italic"),
            bold_italic: format!("{family}-BoldItalic"),
        })
    }

    pub fn face(&self, face: FontFace) -> &str {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
            FontFace::Italic => &self.italic,
            FontFace::BoldItalic => &self.bold_italic,
        }
    }

    /// All four face names, regular first
    pub fn faces(&self) -> impl Iterator<Item = &str> + '_ {
        FontFace::ALL.into_iter().map(move |face| self.face(face))
    }
}

/// Characters allowed in a PostScript font name without escaping
pub fn is_postscript_name_char(ch: char) -> bool {
    ch.is_ascii_graphic() && !"()<>[]{}/%".contains(ch)
}
