//! In-memory document model built by templates and consumed by a
//! [`RenderEngine`](super::traits::RenderEngine).

use std::path::{Path, PathBuf};

/// Horizontal alignment of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Justify,
}

/// Font options for a text run. `None` keeps the engine default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub font: Option<String>,
    pub size_pt: Option<u32>,
    pub bold: bool,
}

impl TextStyle {
    pub fn sized(size_pt: u32) -> Self {
        Self {
            size_pt: Some(size_pt),
            ..Self::default()
        }
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text { content: String, style: TextStyle },
    Image { path: PathBuf },
    LineBreak,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub alignment: Alignment,
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    pub fn new(alignment: Alignment) -> Self {
        Self {
            alignment,
            inlines: Vec::new(),
        }
    }

    pub fn add_text(&mut self, content: impl Into<String>, style: TextStyle) -> &mut Self {
        self.inlines.push(Inline::Text {
            content: content.into(),
            style,
        });
        self
    }

    pub fn add_image(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.inlines.push(Inline::Image {
            path: path.as_ref().to_path_buf(),
        });
        self
    }

    pub fn add_line_break(&mut self) -> &mut Self {
        self.inlines.push(Inline::LineBreak);
        self
    }

    /// Concatenated text of every run, line breaks as `\n`.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for inline in &self.inlines {
            match inline {
                Inline::Text { content, .. } => out.push_str(content),
                Inline::LineBreak => out.push('\n'),
                Inline::Image { .. } => {}
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Page layout. Margins are in twips (1/20 pt).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSetup {
    pub orientation: Orientation,
    pub margin_twips: u32,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            orientation: Orientation::Portrait,
            margin_twips: 650,
        }
    }
}

impl PageSetup {
    pub fn margin_pt(&self) -> f64 {
        f64::from(self.margin_twips) / 20.0
    }
}

/// Ordered paragraphs plus page setup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub page: PageSetup,
    paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new(page: PageSetup) -> Self {
        Self {
            page,
            paragraphs: Vec::new(),
        }
    }

    /// Start a new paragraph and return it for filling.
    pub fn paragraph(&mut self, alignment: Alignment) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::new(alignment));
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Every image path referenced by the document, in order.
    pub fn image_paths(&self) -> Vec<&Path> {
        self.paragraphs
            .iter()
            .flat_map(|p| p.inlines.iter())
            .filter_map(|inline| match inline {
                Inline::Image { path } => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }
}
