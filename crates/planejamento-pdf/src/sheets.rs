//! Tiling a tall capture across fixed-size sheets
//!
//! The capture is scaled to the sheet width. Each sheet then shows one
//! sheet-height window of it, shifted up by the height of all previous
//! sheets, so sheets neither overlap nor leave gaps.

use crate::error::{PdfError, Result};

/// Physical sheet size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetFormat {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl SheetFormat {
    /// A4 in landscape orientation
    pub const A4_LANDSCAPE: SheetFormat = SheetFormat {
        width_mm: 297.0,
        height_mm: 210.0,
    };
}

impl Default for SheetFormat {
    fn default() -> Self {
        Self::A4_LANDSCAPE
    }
}

/// One sheet's window into the capture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sheet {
    /// 0-based sheet index
    pub index: usize,
    /// Top of the window in capture pixels
    pub source_offset_px: f64,
    /// Same offset in sheet millimetres
    pub offset_mm: f64,
}

/// Sheets needed for one capture
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub format: SheetFormat,
    pub image_width_px: u32,
    pub image_height_px: u32,
    /// Capture pixels that fit on one sheet
    pub sheet_height_px: f64,
    pub sheets: Vec<Sheet>,
}

impl SheetLayout {
    /// Tile a `width` x `height` pixel capture onto `format` sheets
    pub fn tile(width: u32, height: u32, format: SheetFormat) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PdfError::EmptyCapture { width, height });
        }

        let sheet_height_px = format.height_mm * (width as f64 / format.width_mm);
        let ratio = format.width_mm / width as f64;

        // Absorb float noise so an exact multiple does not spill onto a
        // blank extra sheet.
        let count = ((height as f64 / sheet_height_px) - 1e-9).ceil().max(1.0) as usize;

        let sheets = (0..count)
            .map(|index| {
                let source_offset_px = sheet_height_px * index as f64;
                Sheet {
                    index,
                    source_offset_px,
                    offset_mm: source_offset_px * ratio,
                }
            })
            .collect();

        Ok(Self {
            format,
            image_width_px: width,
            image_height_px: height,
            sheet_height_px,
            sheets,
        })
    }

    /// Number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Millimetres per capture pixel
    pub fn ratio(&self) -> f64 {
        self.format.width_mm / self.image_width_px as f64
    }

    /// Height of the whole capture once scaled to sheet width
    pub fn image_height_mm(&self) -> f64 {
        self.image_height_px as f64 * self.ratio()
    }
}
