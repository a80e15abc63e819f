//! Report rendering error types.

/// Report rendering error.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Handlebars rendering error.
    #[error("Report rendering error: {0}")]
    RenderError(#[from] handlebars::RenderError),
}
