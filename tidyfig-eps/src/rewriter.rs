use log::{debug, warn};
use regex::{Captures, Regex};
use tidyfig_text::types::FontFace;

use crate::document::VectorDocument;
use crate::error::TidyfigEpsError;
use crate::markers::{is_postscript_name_char, MarkerSet, TargetFamily};

/// Font the exporting renderer writes when nothing else is requested
pub const DEFAULT_SOURCE_FONT: &str = "Helvetica";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Outside,
    Dictionary,
    Reencode { in_dictionary: bool },
}

/// What a rewrite changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewriteReport {
    pub font_references: usize,
    pub bounding_boxes: usize,
    pub dictionaries: usize,
    pub reencodings: usize,
}

impl RewriteReport {
    pub fn found_markers(&self) -> bool {
        self.dictionaries > 0 || self.reencodings > 0
    }
}

pub struct PostScriptFontRewriter {
    markers: MarkerSet,
    target: TargetFamily,
    source_font: String,
    font_pattern: Regex,
}

impl PostScriptFontRewriter {
    pub fn new(target: TargetFamily) -> Result<Self, TidyfigEpsError> {
        Self::with_source_font(target, DEFAULT_SOURCE_FONT)
    }

    pub fn with_source_font(
        target: TargetFamily,
        source_font: &str,
    ) -> Result<Self, TidyfigEpsError> {
        if source_font.is_empty() || !source_font.chars().all(is_postscript_name_char) {
            return Err(TidyfigEpsError::InvalidFontName(source_font.to_string()));
        }
        // The family name, optionally followed by a face suffix: Helvetica-BoldOblique
        let pattern = format!(r"\b{}(?:-([A-Za-z]+))?\b", regex::escape(source_font));
        let font_pattern = Regex::new(&pattern)
            .map_err(|_| TidyfigEpsError::InvalidFontName(source_font.to_string()))?;
        Ok(Self {
            markers: MarkerSet::default(),
            target,
            source_font: source_font.to_string(),
            font_pattern,
        })
    }

    pub fn with_markers(mut self, markers: MarkerSet) -> Self {
        self.markers = markers;
        self
    }

    /// `%%BoundingBox:` directive for a canvas of `[width, height]` points
    pub fn bounding_box_line(&self, canvas: [f32; 2]) -> String {
        format!(
            "{}{:>6}{:>6}{:>6}{:>6}",
            self.markers.bounding_box,
            0,
            0,
            canvas[0].round() as i64,
            canvas[1].round() as i64
        )
    }

    /// Map every source-font reference in `line` to the matching target face
    pub fn substitute_fonts<'a>(&self, line: &'a str) -> (std::borrow::Cow<'a, str>, usize) {
        let mut count = 0;
        let replaced = self.font_pattern.replace_all(line, |caps: &Captures| {
            count += 1;
            let suffix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            self.target
                .face(FontFace::from_postscript_suffix(suffix))
                .to_string()
        });
        (replaced, count)
    }

    fn include_resources(&self, out: &mut Vec<String>) {
        for face in self.target.faces() {
            out.push(format!("%%IncludeResource: font {face}"));
        }
    }

    fn reencode_blocks(&self, out: &mut Vec<String>) {
        for face in self.target.faces() {
            out.push(format!("/{face} findfont"));
            out.push("dup length dict begin".to_string());
            out.push("{1 index /FID ne {def} {pop pop} ifelse} forall".to_string());
            out.push("/Encoding WinAnsiEncoding def".to_string());
            out.push("currentdict".to_string());
            out.push("end".to_string());
            out.push(format!("/{face} exch definefont pop"));
        }
    }

    /// Rewrite `document` in one forward pass, returning a new document.
    ///
    /// Lines inside the font dictionary and reencode regions pass through untouched apart
    /// from the injected blocks; everywhere else source-font references are mapped to the
    /// target family. Bounding-box lines are replaced in every region.
    pub fn rewrite(
        &self,
        document: &VectorDocument,
        canvas: [f32; 2],
    ) -> (VectorDocument, RewriteReport) {
        let markers = &self.markers;
        let mut report = RewriteReport::default();
        let mut out = Vec::with_capacity(document.len() + 32);
        let mut region = Region::Outside;

        for line in document.lines() {
            if line.contains(markers.bounding_box.as_str()) {
                out.push(self.bounding_box_line(canvas));
                report.bounding_boxes += 1;
                continue;
            }

            let marker = line.trim_end();
            region = match region {
                Region::Outside | Region::Dictionary if marker == markers.reencode_start => {
                    out.push(line.clone());
                    self.reencode_blocks(&mut out);
                    report.reencodings += 1;
                    Region::Reencode {
                        in_dictionary: region == Region::Dictionary,
                    }
                }
                Region::Outside if marker == markers.dictionary_start => {
                    out.push(line.clone());
                    self.include_resources(&mut out);
                    report.dictionaries += 1;
                    Region::Dictionary
                }
                Region::Outside => {
                    let (rewritten, count) = self.substitute_fonts(line);
                    report.font_references += count;
                    out.push(rewritten.into_owned());
                    Region::Outside
                }
                Region::Dictionary => {
                    out.push(line.clone());
                    if marker == markers.dictionary_end {
                        Region::Outside
                    } else {
                        Region::Dictionary
                    }
                }
                Region::Reencode { in_dictionary } => {
                    out.push(line.clone());
                    match (marker == markers.reencode_end, in_dictionary) {
                        (true, true) => Region::Dictionary,
                        (true, false) => Region::Outside,
                        (false, _) => region,
                    }
                }
            };
        }

        if !report.found_markers() && report.font_references > 0 {
            warn!(
                "no font dictionary markers found; substituted {} `{}` references inline",
                report.font_references, self.source_font
            );
        }
        debug!("rewrite: {report:?}");

        (VectorDocument::with_lines_like(document, out), report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rewriter() -> PostScriptFontRewriter {
        PostScriptFontRewriter::new(TargetFamily::arial()).unwrap()
    }

    #[test]
    fn test_bounding_box_line_format() {
        assert_eq!(
            rewriter().bounding_box_line([252.0, 235.0]),
            "%%BoundingBox:     0     0   252   235"
        );
        assert_eq!(
            rewriter().bounding_box_line([393.7, 1000.2]),
            "%%BoundingBox:     0     0   394  1000"
        );
    }

    #[rstest(
        line,
        expected,
        case("/Helvetica findfont", "/ArialMT findfont"),
        case("/Helvetica-Bold findfont", "/Arial-BoldMT findfont"),
        case("/Helvetica-Oblique findfont", "/Arial-ItalicMT findfont"),
        case("/Helvetica-Italic findfont", "/Arial-ItalicMT findfont"),
        case("/Helvetica-BoldOblique findfont", "/Arial-BoldItalicMT findfont"),
        case("%%DocumentNeededFonts: Helvetica", "%%DocumentNeededFonts: ArialMT"),
        case(
            "/Helvetica /ISOLatin1Encoding 120 FMSR",
            "/ArialMT /ISOLatin1Encoding 120 FMSR"
        ),
        case("/HelveticaNeue findfont", "/HelveticaNeue findfont"),
        case("0 0 moveto", "0 0 moveto")
    )]
    fn test_substitute_fonts(line: &str, expected: &str) {
        assert_eq!(rewriter().substitute_fonts(line).0, expected);
    }

    #[test]
    fn test_multiple_references_on_one_line() {
        let (line, count) =
            rewriter().substitute_fonts("%%DocumentFonts: Helvetica Helvetica-Bold");
        assert_eq!(line, "%%DocumentFonts: ArialMT Arial-BoldMT");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_invalid_source_font() {
        assert!(PostScriptFontRewriter::with_source_font(TargetFamily::arial(), "a/b").is_err());
        assert!(PostScriptFontRewriter::with_source_font(TargetFamily::arial(), "").is_err());
    }

    #[test]
    fn test_custom_markers() {
        let rewriter = rewriter().with_markers(MarkerSet {
            dictionary_start: "%%BeginFonts".to_string(),
            dictionary_end: "%%EndFonts".to_string(),
            ..Default::default()
        });
        let doc = VectorDocument::from_lines(["%%BeginFonts", "/Helvetica", "%%EndFonts"]);
        let (out, report) = rewriter.rewrite(&doc, [100.0, 100.0]);
        assert_eq!(report.dictionaries, 1);
        assert_eq!(out.lines()[5], "/Helvetica");
    }
}
