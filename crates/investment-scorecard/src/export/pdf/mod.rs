//! Letter-sized text report rendered with the built-in Helvetica fonts.

mod document;
mod layout;
mod metrics;

pub use document::PdfDocument;
pub use layout::{layout_report, PageLayout, TextLine};
pub use metrics::Font;

use super::ExportError;
use crate::scorecard::Scorecard;
use chrono::Utc;
use std::io::Write;

pub fn render_pdf(scorecard: &Scorecard) -> PdfDocument {
    PdfDocument::new(layout_report(scorecard), Utc::now())
}

pub fn write_pdf<W: Write>(scorecard: &Scorecard, writer: W) -> Result<(), ExportError> {
    render_pdf(scorecard).write_to(writer)?;
    Ok(())
}
