//! Report module - renders a consultation record into a single-page PDF.

pub mod renderer;


use std::path::PathBuf;

use thiserror::Error;

pub use renderer::{render_report, RequestMetadata};

/// Errors that can occur while rendering a report.
///
/// A logo that exists in the record but cannot be read or decoded is a hard
/// failure; the caller gets the error instead of a silently logo-less page.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read logo image {path}: {source}")]
    LogoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode logo image {path}: {message}")]
    LogoDecode { path: PathBuf, message: String },
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}
