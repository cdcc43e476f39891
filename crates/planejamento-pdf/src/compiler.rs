//! Typst to PDF compiler
//!
//! Compiles sheet markup to PDF bytes using typst-as-lib, serving the
//! raster capture as a static file.

use crate::error::{PdfError, Result};
use crate::transpiler::CAPTURE_FILE;
use typst_as_lib::TypstEngine;

/// Compiler for converting Typst markup to PDF
pub struct Compiler;

impl Compiler {
    /// Compile markup that references the capture PNG
    ///
    /// # Arguments
    /// * `markup` - Typst markup string
    /// * `capture_png` - PNG bytes served as [`CAPTURE_FILE`]
    ///
    /// # Returns
    /// PDF bytes on success
    pub fn compile(markup: &str, capture_png: Vec<u8>) -> Result<Vec<u8>> {
        let engine = TypstEngine::builder()
            .main_file(markup.to_string())
            .with_static_file_resolver([(CAPTURE_FILE, capture_png)])
            .build();

        // compiled is Warned<Result<Document, Error>>
        let compiled = engine.compile();
        if !compiled.warnings.is_empty() {
            tracing::debug!(warnings = compiled.warnings.len(), "typst reported warnings");
        }

        let document = compiled
            .output
            .map_err(|e| PdfError::Compilation(format!("{:?}", e)))?;

        let options = typst_pdf::PdfOptions::default();
        let pdf_bytes = typst_pdf::pdf(&document, &options)
            .map_err(|e| PdfError::Compilation(format!("PDF generation failed: {:?}", e)))?;

        Ok(pdf_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::{SheetFormat, SheetLayout};
    use crate::transpiler::Transpiler;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut pixmap = tiny_skia::Pixmap::new(width, height).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(200, 30, 30, 255));
        pixmap.encode_png().unwrap()
    }

    #[test]
    fn test_compile_tiled_capture() {
        let layout = SheetLayout::tile(297, 420, SheetFormat::A4_LANDSCAPE).unwrap();
        let markup = Transpiler::transpile(&layout, "teste");
        let result = Compiler::compile(&markup, png(297, 420));

        assert!(result.is_ok(), "Compilation failed: {:?}", result.err());
        assert!(result.unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_missing_capture_fails() {
        let markup = "#image(\"other.png\")";
        let result = Compiler::compile(markup, png(1, 1));
        assert!(matches!(result, Err(PdfError::Compilation(_))));
    }
}
