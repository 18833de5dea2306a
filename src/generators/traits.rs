//! Traits for the document rendering seam.

use async_trait::async_trait;

use super::document::Document;
use super::RenderError;

/// Serializes a built [`Document`] into its binary format.
#[async_trait]
pub trait RenderEngine: Send + Sync {
    /// File extension of the produced format, without the dot.
    fn extension(&self) -> &str;

    /// Render the whole document. Completes only once every byte is produced.
    async fn render(&self, document: &Document) -> Result<Vec<u8>, RenderError>;
}
