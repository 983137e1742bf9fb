//! `{field_name}` renderer for substitutable template files.

use cocoscaff_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::ProjectParameters,
    error::CocoscaffResult,
};
use tracing::instrument;

/// Decodes the file as UTF-8 and substitutes placeholders from the
/// validated parameters. Non-UTF-8 input is a rendering error, never a
/// lossy conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRenderer;

impl PlaceholderRenderer {
    /// Create a new placeholder renderer.
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    #[instrument(skip_all, fields(bytes = source.len()))]
    fn render(&self, source: &[u8], params: &ProjectParameters) -> CocoscaffResult<String> {
        let text = std::str::from_utf8(source).map_err(|e| ApplicationError::RenderingFailed {
            reason: format!("not valid UTF-8: {e}"),
        })?;
        Ok(params.render(text)?)
    }
}
