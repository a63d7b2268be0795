//! Downloadable renderings of a scorecard.

mod csv;
pub mod pdf;

pub use self::csv::write_csv;
pub use self::pdf::write_pdf;

use crate::scorecard::Scorecard;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn mime(self) -> mime::Mime {
        match self {
            Self::Csv => mime::TEXT_CSV,
            Self::Pdf => mime::APPLICATION_PDF,
        }
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Csv => "investment_scorecard.csv",
            Self::Pdf => "investment_scorecard.pdf",
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }

    /// Render `scorecard` into an in-memory buffer.
    pub fn render(self, scorecard: &Scorecard) -> Result<Vec<u8>, ExportError> {
        let mut buffer = Vec::new();
        match self {
            Self::Csv => write_csv(scorecard, &mut buffer)?,
            Self::Pdf => write_pdf(scorecard, &mut buffer)?,
        }
        Ok(buffer)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "pdf" => Ok(Self::Pdf),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unsupported export format '{0}' (expected csv or pdf)")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Csv(#[from] ::csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Python-style float text: whole numbers keep a trailing `.0`.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
