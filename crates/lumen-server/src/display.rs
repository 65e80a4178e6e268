use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lumen_core::{GenerationResult, Image, Prompt, derive_filename};

/// One image column: the picture plus its download action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub index: usize,
    pub filename: String,
    /// Inline `data:` URI of the image payload
    pub source: String,
}

impl Column {
    fn new(prompt: &Prompt, image: &Image) -> Self {
        Self {
            index: image.index(),
            filename: derive_filename(prompt.as_str(), image.index()),
            source: format!("data:image/png;base64,{}", STANDARD.encode(image.bytes())),
        }
    }

    /// Route serving this image as a download
    pub fn download_href(&self) -> String {
        format!("/images/{}", self.index)
    }
}

/// Horizontal row of generated images, one column per image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    columns: Vec<Column>,
}

impl Gallery {
    /// Lay out `result`, naming downloads after `prompt`
    ///
    /// Without a result the gallery is empty and offers no downloads.
    pub fn new(prompt: Option<&Prompt>, result: Option<&GenerationResult>) -> Self {
        let columns = match (prompt, result) {
            (Some(prompt), Some(result)) => result.images().iter().map(|image| Column::new(prompt, image)).collect(),
            _ => Vec::new(),
        };

        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}
