//! Typst rendering engine.
//!
//! Lowers a [`Document`] to Typst markup, stages its images next to the
//! source in a temporary directory, invokes the compiler, and returns the
//! resulting PDF bytes.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use tokio::process::Command;

use super::common::escape_typst_string;
use super::document::{Alignment, Document, Inline, Orientation, Paragraph, TextStyle};
use super::traits::RenderEngine;
use super::RenderError;

const SOURCE_FILE: &str = "document.typ";
const OUTPUT_FILE: &str = "document.pdf";

/// An image copied into the compilation root under `staged_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedAsset {
    pub source: PathBuf,
    pub staged_name: String,
}

/// Engine that shells out to the Typst CLI.
#[derive(Debug, Clone)]
pub struct TypstRenderEngine {
    binary: PathBuf,
}

impl TypstRenderEngine {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl RenderEngine for TypstRenderEngine {
    fn extension(&self) -> &str {
        "pdf"
    }

    async fn render(&self, document: &Document) -> Result<Vec<u8>, RenderError> {
        let temp_dir = tempdir().map_err(RenderError::TempDir)?;
        let (source, assets) = lower_to_typst(document);

        for asset in &assets {
            tokio::fs::copy(&asset.source, temp_dir.path().join(&asset.staged_name))
                .await
                .map_err(|source| RenderError::StageAsset {
                    path: asset.source.clone(),
                    source,
                })?;
        }

        let typ_path = temp_dir.path().join(SOURCE_FILE);
        tokio::fs::write(&typ_path, source)
            .await
            .map_err(RenderError::WriteTypst)?;

        compile_typst_to_pdf(&self.binary, temp_dir.path()).await
    }
}

/// Compile `document.typ` inside `root` and read back the PDF.
async fn compile_typst_to_pdf(binary: &Path, root: &Path) -> Result<Vec<u8>, RenderError> {
    let output_path = root.join(OUTPUT_FILE);

    let output = Command::new(binary)
        .arg("compile")
        .arg("--root")
        .arg(root)
        .arg(root.join(SOURCE_FILE))
        .arg(&output_path)
        .current_dir(root)
        .output()
        .await
        .map_err(RenderError::TypstIo)?;

    if !output.status.success() {
        return Err(RenderError::TypstExit {
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    tokio::fs::read(&output_path)
        .await
        .map_err(RenderError::ReadPdf)
}

/// Produce Typst source for the document, plus the images it references.
pub fn lower_to_typst(document: &Document) -> (String, Vec<StagedAsset>) {
    let mut assets = Vec::new();
    let mut out = String::new();

    let flipped = document.page.orientation == Orientation::Landscape;
    out.push_str(&format!(
        "#set page(paper: \"a4\", flipped: {}, margin: {:.1}pt)\n",
        flipped,
        document.page.margin_pt()
    ));
    out.push_str("#set text(lang: \"pt\")\n\n");

    for paragraph in document.paragraphs() {
        out.push_str(&lower_paragraph(paragraph, &mut assets));
        out.push_str("\n\n");
    }

    (out, assets)
}

fn lower_paragraph(paragraph: &Paragraph, assets: &mut Vec<StagedAsset>) -> String {
    if paragraph.inlines.is_empty() {
        return "#v(1em)".to_string();
    }

    let mut body = String::new();
    for inline in &paragraph.inlines {
        match inline {
            Inline::Text { content, style } => {
                if !content.is_empty() {
                    body.push_str(&lower_text(content, style));
                }
            }
            Inline::Image { path } => {
                let staged_name = format!("asset-{}.{}", assets.len(), image_extension(path));
                body.push_str(&format!("#box(image(\"{}\"))", staged_name));
                assets.push(StagedAsset {
                    source: path.clone(),
                    staged_name,
                });
            }
            Inline::LineBreak => body.push_str("#linebreak()"),
        }
    }

    match paragraph.alignment {
        Alignment::Left => format!("#par(justify: false)[{}]", body),
        Alignment::Center => format!("#align(center)[#par(justify: false)[{}]]", body),
        Alignment::Justify => format!("#par(justify: true)[{}]", body),
    }
}

fn lower_text(content: &str, style: &TextStyle) -> String {
    let mut args = Vec::new();
    if let Some(font) = &style.font {
        args.push(format!("font: \"{}\"", escape_typst_string(font)));
    }
    if let Some(size) = style.size_pt {
        args.push(format!("size: {}pt", size));
    }
    if style.bold {
        args.push("weight: \"bold\"".to_string());
    }
    args.push(format!("\"{}\"", escape_typst_string(content)));
    format!("#text({})", args.join(", "))
}

fn image_extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_else(|| "png".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::document::PageSetup;

    fn sample() -> Document {
        let mut doc = Document::new(PageSetup::default());
        doc.paragraph(Alignment::Center).add_image("/opt/assets/logo.PNG");
        doc.paragraph(Alignment::Center).add_text(
            "TÍTULO",
            TextStyle::sized(14).font("Arial").bold(),
        );
        doc.paragraph(Alignment::Justify)
            .add_text(r#"ACME "SA""#, TextStyle::sized(12))
            .add_line_break()
            .add_text("", TextStyle::default());
        doc.paragraph(Alignment::Justify);
        doc
    }

    #[test]
    fn test_lower_page_setup() {
        let (source, _) = lower_to_typst(&sample());
        assert!(source.starts_with("#set page(paper: \"a4\", flipped: false, margin: 32.5pt)"));
    }

    #[test]
    fn test_lower_stages_images() {
        let (source, assets) = lower_to_typst(&sample());
        assert_eq!(
            assets,
            vec![StagedAsset {
                source: PathBuf::from("/opt/assets/logo.PNG"),
                staged_name: "asset-0.png".to_string(),
            }]
        );
        assert!(source.contains("#align(center)[#par(justify: false)[#box(image(\"asset-0.png\"))]]"));
    }

    #[test]
    fn test_lower_text_styles_and_escaping() {
        let (source, _) = lower_to_typst(&sample());
        assert!(source.contains(
            "#text(font: \"Arial\", size: 14pt, weight: \"bold\", \"TÍTULO\")"
        ));
        assert!(source.contains(
            "#par(justify: true)[#text(size: 12pt, \"ACME \\\"SA\\\"\")#linebreak()]"
        ));
        assert!(source.contains("#v(1em)"));
    }

    #[tokio::test]
    async fn test_render_missing_image_fails_before_compiling() {
        let mut doc = Document::default();
        doc.paragraph(Alignment::Center)
            .add_image("/nonexistent/dir/logo.png");

        let engine = TypstRenderEngine::new("typst");
        let err = engine.render(&doc).await.unwrap_err();
        assert!(matches!(err, RenderError::StageAsset { .. }));
    }

    #[tokio::test]
    #[ignore = "requires the typst CLI on PATH"]
    async fn test_render_compiles_to_pdf() {
        let logo = std::path::Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/logo.png"));
        let mut doc = Document::new(PageSetup::default());
        doc.paragraph(Alignment::Center).add_image(logo);
        doc.paragraph(Alignment::Justify)
            .add_text(r#"ACME "SA", Rua X, 10"#, TextStyle::sized(12))
            .add_line_break()
            .add_text("Nome:____", TextStyle::sized(8).bold());

        let pdf = TypstRenderEngine::new("typst").render(&doc).await.unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_render_missing_binary_is_an_error() {
        let mut doc = Document::default();
        doc.paragraph(Alignment::Left)
            .add_text("x", TextStyle::default());

        let engine = TypstRenderEngine::new("/nonexistent/bin/typst-cli");
        let err = engine.render(&doc).await.unwrap_err();
        assert!(matches!(err, RenderError::TypstIo(_)));
    }
}
