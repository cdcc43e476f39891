//! Sheet layout to Typst markup transpiler
//!
//! Every sheet is a clipped full-page block holding the capture image,
//! shifted up by the sheet's offset.

use crate::sheets::SheetLayout;

/// Virtual path the capture is served under during compilation
pub const CAPTURE_FILE: &str = "capture.png";

/// Transpiler for converting a sheet layout to Typst markup
pub struct Transpiler;

impl Transpiler {
    /// Transpile a sheet layout to Typst markup
    pub fn transpile(layout: &SheetLayout, title: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "#set document(title: \"{}\")\n",
            escape_string(title)
        ));
        output.push_str(&format!(
            "#set page(width: {}mm, height: {}mm, margin: 0pt)\n\n",
            layout.format.width_mm, layout.format.height_mm
        ));

        for (i, sheet) in layout.sheets.iter().enumerate() {
            if i > 0 {
                output.push_str("#pagebreak()\n");
            }
            output.push_str(&format!(
                "#block(width: 100%, height: 100%, clip: true)[#place(top + left, dy: -{:.3}mm, image(\"{}\", width: {}mm))]\n",
                sheet.offset_mm, CAPTURE_FILE, layout.format.width_mm
            ));
        }

        output
    }
}

/// Escape a string for use inside a Typst string literal
fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
