use std::path::Path;

use log::info;
use tidyfig_eps::document::VectorDocument;
use tidyfig_eps::markers::TargetFamily;
use tidyfig_eps::rewriter::{PostScriptFontRewriter, RewriteReport, DEFAULT_SOURCE_FONT};

use crate::error::TidyfigError;
use crate::options::ExportOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub report: RewriteReport,
    /// Present when `ExportMessage` is on and `Verbosity` is at least 1
    pub message: Option<String>,
}

/// Family the exported file should name.
///
/// The host's default Helvetica maps to Arial, which design tools ship everywhere; any
/// other configured family is kept under its own name.
pub fn target_family(options: &ExportOptions) -> Result<TargetFamily, TidyfigError> {
    if options.font_name.eq_ignore_ascii_case(DEFAULT_SOURCE_FONT) {
        Ok(TargetFamily::arial())
    } else {
        Ok(TargetFamily::from_family(&options.font_name)?)
    }
}

/// Rewrite the vector file at `path` in place for a `canvas` of `[width, height]` points
pub fn rewrite_vector_file(
    path: &Path,
    canvas: [f32; 2],
    target: TargetFamily,
) -> Result<RewriteReport, TidyfigError> {
    let rewriter = PostScriptFontRewriter::new(target)?;
    let document = VectorDocument::read(path)?;
    let (rewritten, report) = rewriter.rewrite(&document, canvas);
    rewritten.write_atomic(path)?;
    Ok(report)
}

/// Post-process the file named by `options.filename`, if any.
///
/// Returns `None` when no filename is configured.
pub fn export_vector_file(options: &ExportOptions) -> Result<Option<ExportOutcome>, TidyfigError> {
    options.validate()?;
    let Some(path) = options.filename.as_deref() else {
        return Ok(None);
    };

    let canvas = options.canvas();
    let target = target_family(options)?;
    let family = target.family.clone();
    let report = rewrite_vector_file(path, canvas, target)?;

    let message = options.shows_export_message().then(|| {
        format!(
            "Exported {} at {} x {} pt ({} {} column), {} font references set in {}",
            path.display(),
            canvas[0],
            canvas[1],
            options.journal,
            options.width,
            report.font_references,
            family
        )
    });
    if let Some(message) = &message {
        info!("{message}");
    }

    Ok(Some(ExportOutcome { report, message }))
}
