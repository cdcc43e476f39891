//! SVG preview of the plan pages
//!
//! Pages are stacked vertically, each A4 landscape in proportion
//! (1188 x 840 px), so a capture tiles onto sheets one page per sheet. A page
//! whose cells need more lines grows by whole sheet heights, so every page
//! still starts on a sheet boundary and no cell text is clipped.

use std::fmt::Write as _;

use planejamento_core::{Activity, PageLayout, PlanInput};
use quick_xml::escape::escape;

use crate::asset::{LogoAsset, LOGO_PLACEHOLDER};

/// Page width in surface pixels
pub const PAGE_WIDTH: f32 = 1188.0;
/// Page height in surface pixels (297:210)
pub const PAGE_HEIGHT: f32 = 840.0;

const MARGIN: f32 = 24.0;
const HEADER_HEIGHT: f32 = 96.0;
const THEAD_HEIGHT: f32 = 64.0;
const LOGO_WIDTH: f32 = 180.0;
const LOGO_HEIGHT: f32 = 72.0;
const CELL_PADDING: f32 = 10.0;
const LINE_HEIGHT: f32 = 16.0;
const HEADING_LINE_HEIGHT: f32 = 15.0;
const BODY_WRAP: usize = 42;
const HEADING_WRAP: usize = 30;
const FONT_FAMILY: &str = "DejaVu Sans, Liberation Sans, Arial, sans-serif";
const BORDER: &str = "#333333";
const HEAD_FILL: &str = "#e8eef7";
const LOGO_FILL: &str = "#1f4e9c";

/// Build the SVG markup for every page of `layout`
pub fn render_svg(plan: &PlanInput, layout: &PageLayout, logo: &LogoAsset) -> String {
    let pages: Vec<(usize, [Vec<String>; 4], f32)> = layout
        .records()
        .map(|record| {
            let cells = Activity::ALL
                .map(|activity| wrap_text(layout.cell(record.index, activity), BODY_WRAP));
            let height = page_height(&cells);
            (record.index, cells, height)
        })
        .collect();

    let height: f32 = pages.iter().map(|(_, _, h)| h).sum();
    let title = plan.header_title();
    let logo_href = logo.data_url();

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{font}">"#,
        w = PAGE_WIDTH,
        h = height,
        font = FONT_FAMILY,
    );
    let _ = write!(
        svg,
        r##"<rect x="0" y="0" width="{}" height="{}" fill="#ffffff"/>"##,
        PAGE_WIDTH, height
    );

    let mut y0 = 0.0_f32;
    for (index, cells, page_h) in &pages {
        let _ = write!(svg, r#"<g transform="translate(0 {})">"#, y0);
        write_header(&mut svg, &title, logo_href.as_deref());
        write_table(&mut svg, cells, *page_h);
        svg.push_str("</g>");

        if *page_h > PAGE_HEIGHT {
            tracing::debug!(page = index, height = page_h, "page grown to fit cell text");
        }
        y0 += *page_h;
    }

    svg.push_str("</svg>");
    svg
}

/// Height of one page: the A4 page, or whole multiples of it when the
/// tallest cell needs more room
fn page_height(cells: &[Vec<String>; 4]) -> f32 {
    let lines = cells.iter().map(Vec::len).max().unwrap_or(0);
    let needed = MARGIN
        + HEADER_HEIGHT
        + THEAD_HEIGHT
        + 2.0 * CELL_PADDING
        + LINE_HEIGHT * lines as f32
        + MARGIN;
    let sheets = (needed / PAGE_HEIGHT).ceil().max(1.0);
    PAGE_HEIGHT * sheets
}

fn write_header(svg: &mut String, title: &str, logo_href: Option<&str>) {
    let _ = write!(
        svg,
        r#"<text x="{}" y="{}" font-size="22" font-weight="bold" fill="{}">{}</text>"#,
        MARGIN,
        MARGIN + 52.0,
        BORDER,
        escape(title)
    );

    let logo_x = PAGE_WIDTH - MARGIN - LOGO_WIDTH;
    match logo_href {
        Some(href) => {
            let _ = write!(
                svg,
                r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid meet" xlink:href="{}"/>"#,
                logo_x, MARGIN, LOGO_WIDTH, LOGO_HEIGHT, href
            );
        }
        None => {
            let _ = write!(
                svg,
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="6" fill="{}"/>"#,
                logo_x, MARGIN, LOGO_WIDTH, LOGO_HEIGHT, LOGO_FILL
            );
            let center = logo_x + LOGO_WIDTH / 2.0;
            for (i, line) in LOGO_PLACEHOLDER.iter().enumerate() {
                let _ = write!(
                    svg,
                    r##"<text x="{}" y="{}" font-size="14" font-weight="bold" text-anchor="middle" fill="#ffffff">{}</text>"##,
                    center,
                    MARGIN + 22.0 + 20.0 * i as f32,
                    escape(*line)
                );
            }
        }
    }

    let rule_y = MARGIN + HEADER_HEIGHT - 8.0;
    let _ = write!(
        svg,
        r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="2"/>"#,
        MARGIN,
        rule_y,
        PAGE_WIDTH - MARGIN,
        rule_y,
        BORDER
    );
}

fn write_table(svg: &mut String, cells: &[Vec<String>; 4], page_h: f32) {
    let table_x = MARGIN;
    let table_y = MARGIN + HEADER_HEIGHT;
    let table_w = PAGE_WIDTH - 2.0 * MARGIN;
    let table_h = page_h - MARGIN - table_y;
    let col_w = table_w / Activity::ALL.len() as f32;
    let body_y = table_y + THEAD_HEIGHT;

    let _ = write!(
        svg,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        table_x, table_y, table_w, THEAD_HEIGHT, HEAD_FILL
    );

    for activity in Activity::ALL {
        let x = table_x + col_w * activity.index() as f32;

        let heading = wrap_text(activity.heading(), HEADING_WRAP);
        let block_h = HEADING_LINE_HEIGHT * heading.len() as f32;
        let first_baseline = table_y + (THEAD_HEIGHT - block_h) / 2.0 + 11.0;
        for (i, line) in heading.iter().enumerate() {
            let _ = write!(
                svg,
                r#"<text x="{}" y="{}" font-size="12" font-weight="bold" text-anchor="middle" fill="{}">{}</text>"#,
                x + col_w / 2.0,
                first_baseline + HEADING_LINE_HEIGHT * i as f32,
                BORDER,
                escape(line.as_str())
            );
        }

        for (i, line) in cells[activity.index()].iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let _ = write!(
                svg,
                r#"<text x="{}" y="{}" font-size="12" fill="{}" xml:space="preserve">{}</text>"#,
                x + CELL_PADDING,
                body_y + CELL_PADDING + 12.0 + LINE_HEIGHT * i as f32,
                BORDER,
                escape(line.as_str())
            );
        }

        if activity.index() > 0 {
            let _ = write!(
                svg,
                r#"<line x1="{x}" y1="{}" x2="{x}" y2="{}" stroke="{}" stroke-width="1"/>"#,
                table_y,
                table_y + table_h,
                BORDER,
                x = x
            );
        }
    }

    let _ = write!(
        svg,
        r#"<line x1="{}" y1="{y}" x2="{}" y2="{y}" stroke="{}" stroke-width="1"/>"#,
        table_x,
        table_x + table_w,
        BORDER,
        y = body_y
    );
    let _ = write!(
        svg,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
        table_x, table_y, table_w, table_h, BORDER
    );
}

/// Greedy word wrap to `width` characters.
///
/// Line breaks in `text` are kept; words longer than a line are cut.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut len = 0usize;

        for word in paragraph.split_whitespace() {
            let mut rest = word;
            let mut rest_len = word.chars().count();

            if len > 0 && len + 1 + rest_len > width {
                lines.push(std::mem::take(&mut line));
                len = 0;
            }

            while len == 0 && rest_len > width {
                let idx = rest
                    .char_indices()
                    .nth(width)
                    .map(|(i, _)| i)
                    .unwrap_or(rest.len());
                lines.push(rest[..idx].to_string());
                rest = &rest[idx..];
                rest_len -= width;
            }

            if len > 0 {
                line.push(' ');
                len += 1;
            }
            line.push_str(rest);
            len += rest_len;
        }

        lines.push(line);
    }

    lines
}
