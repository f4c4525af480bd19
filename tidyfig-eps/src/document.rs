use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::TidyfigEpsError;

/// Line terminator a document was read with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// An exported vector file as an ordered sequence of lines.
///
/// Files are decoded as Latin-1, one character per byte, so any byte sequence survives a
/// read and write unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VectorDocument {
    lines: Vec<String>,
    trailing_newline: bool,
    line_ending: LineEnding,
}

impl VectorDocument {
    pub fn from_lines<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            trailing_newline: true,
            line_ending: LineEnding::Lf,
        }
    }

    pub fn parse(text: &str) -> Self {
        let line_ending = match text.find('\n') {
            Some(i) if text[..i].ends_with('\r') => LineEnding::CrLf,
            _ => LineEnding::Lf,
        };
        Self {
            lines: text.lines().map(str::to_string).collect(),
            trailing_newline: text.ends_with('\n'),
            line_ending,
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let text: String = bytes.iter().map(|&b| char::from(b)).collect();
        Self::parse(&text)
    }

    pub fn read(path: &Path) -> Result<Self, TidyfigEpsError> {
        let bytes = fs::read(path).map_err(|source| TidyfigEpsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_bytes(&bytes))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Same line terminator conventions as `other`, new content
    pub(crate) fn with_lines_like(other: &VectorDocument, lines: Vec<String>) -> Self {
        Self {
            lines,
            trailing_newline: other.trailing_newline,
            line_ending: other.line_ending,
        }
    }

    pub fn to_text(&self) -> String {
        let ending = self.line_ending.as_str();
        let mut text = self.lines.join(ending);
        if self.trailing_newline && !self.lines.is_empty() {
            text.push_str(ending);
        }
        text
    }

    /// Latin-1 encoding of the document, `None` if a character has no single-byte form
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        self.to_text().chars().map(|c| u8::try_from(c).ok()).collect()
    }

    /// Replace the file at `path` with this document.
    ///
    /// The content goes to a sibling temporary file first and is renamed over the target, so
    /// a failed write never leaves a truncated file behind.
    pub fn write_atomic(&self, path: &Path) -> Result<(), TidyfigEpsError> {
        let write_err = |source| TidyfigEpsError::Write {
            path: path.to_path_buf(),
            source,
        };
        let bytes = self.to_bytes().ok_or_else(|| {
            write_err(io::Error::new(
                io::ErrorKind::InvalidData,
                "document contains characters outside Latin-1",
            ))
        })?;
        let tmp_path = temporary_sibling(path);

        let result = fs::File::create(&tmp_path).and_then(|mut file| {
            file.write_all(&bytes)?;
            file.sync_all()
        });
        if let Err(source) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(write_err(source));
        }

        fs::rename(&tmp_path, path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            write_err(source)
        })
    }
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tidyfig-tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_trailing_newline() {
        let doc = VectorDocument::parse("%!PS-Adobe-3.0 EPSF-3.0\n%%EOF\n");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.to_text(), "%!PS-Adobe-3.0 EPSF-3.0\n%%EOF\n");

        let doc = VectorDocument::parse("showpage");
        assert_eq!(doc.to_text(), "showpage");
    }

    #[test]
    fn test_parse_keeps_crlf() {
        let doc = VectorDocument::parse("%!PS-Adobe-3.0 EPSF-3.0\r\n%%EOF\r\n");
        assert_eq!(doc.line_ending(), LineEnding::CrLf);
        assert_eq!(doc.lines(), ["%!PS-Adobe-3.0 EPSF-3.0", "%%EOF"]);
        assert_eq!(doc.to_text(), "%!PS-Adobe-3.0 EPSF-3.0\r\n%%EOF\r\n");
    }

    #[test]
    fn test_latin1_bytes_survive() {
        let bytes = b"(25 \xB0C) show\n(\xB5s) show\n";
        let doc = VectorDocument::from_bytes(bytes);
        assert_eq!(doc.lines()[0], "(25 °C) show");
        assert_eq!(doc.to_bytes().unwrap(), bytes.to_vec());
    }

    #[test]
    fn test_wide_characters_cannot_be_encoded() {
        let doc = VectorDocument::from_lines(["(\u{2212}1) show"]);
        assert_eq!(doc.to_bytes(), None);
    }

    #[test]
    fn test_temporary_sibling() {
        assert_eq!(
            temporary_sibling(Path::new("/tmp/out/figure.eps")),
            PathBuf::from("/tmp/out/figure.eps.tidyfig-tmp")
        );
    }
}
