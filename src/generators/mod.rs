//! Generators module - business logic for building authorization documents
//! and rendering them to PDF through Typst.

pub mod authorization;
pub mod common;
pub mod document;
pub mod engine;
pub mod traits;

pub use authorization::{build_authorization, AuthorizationGenerator};
pub use document::{Alignment, Document, Inline, PageSetup, Paragraph, TextStyle};
pub use engine::TypstRenderEngine;
pub use traits::RenderEngine;

use std::path::PathBuf;
use thiserror::Error;

use crate::storage::WriteError;

/// Errors that can occur while rendering a document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("failed to stage image {path}: {source}")]
    StageAsset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write Typst source: {0}")]
    WriteTypst(#[source] std::io::Error),
    #[error("Typst CLI execution failed: {0}")]
    TypstIo(#[source] std::io::Error),
    #[error("Typst CLI exited with status {code}: {stderr}")]
    TypstExit { code: i32, stderr: String },
    #[error("failed to read generated PDF: {0}")]
    ReadPdf(#[source] std::io::Error),
    #[error("{0}")]
    Engine(String),
}

/// Failure to produce one partner's document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
    #[error("write failed: {0}")]
    Write(#[from] WriteError),
}

/// Result of a successful document generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub partner_name: String,
    pub filename: String,
    pub path: PathBuf,
    pub size: usize,
}
