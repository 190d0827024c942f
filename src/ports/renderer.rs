//! Ticket renderer port.

use std::collections::HashMap;
use thiserror::Error;

use super::classifier::TicketCategory;

/// Errors surfaced by the template backend.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no template registered for category '{0}'")]
    MissingTemplate(TicketCategory),

    #[error("template rendering failed: {0}")]
    RenderFailed(String),
}

/// Renders ticket text from a category and collected field values.
///
/// Implementations own the templates and their per-category default values;
/// callers pass every field they have and let the template pick.
pub trait TicketRenderer: Send + Sync {
    fn render(
        &self,
        category: TicketCategory,
        fields: &HashMap<String, String>,
    ) -> Result<String, RenderError>;
}
