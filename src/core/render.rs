//! Turns a label batch into a printable HTML page and a terminal preview.

use crate::core::barcode;
use crate::models::label::{LabelBatch, LabelDescriptor, LabelKind};
use crate::ui::messages::warning;
use crate::utils::formatting::{bold, escape_html, pad_right};
use std::fmt::Write;

/// Physical label size in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelSize {
    pub width_mm: u32,
    pub height_mm: u32,
}

impl Default for LabelSize {
    fn default() -> Self {
        Self {
            width_mm: 90,
            height_mm: 42,
        }
    }
}

/// Rendered page plus the barcode failures that were skipped.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub html: String,
    pub barcode_failures: Vec<String>,
}

const STYLE: &str = r#"
@page { margin: 0; }
body { margin: 0; font-family: Arial, sans-serif; }
.label-badge { width: var(--label-width); height: var(--label-height); box-sizing: border-box; padding: 1.5mm; page-break-after: always; display: flex; flex-direction: column; justify-content: space-between; overflow: hidden; }
.label-row-top, .label-row-middle, .label-row-bottom { display: flex; justify-content: space-between; align-items: center; }
.label-desc { font-weight: 700; font-size: 9pt; }
.label-meta-top { font-size: 7pt; }
.label-big-num { font-family: 'Arial Black', sans-serif; font-size: 48pt; line-height: 0.9; }
.label-big-num.validity { font-size: 87pt; line-height: 0.8; letter-spacing: -3px; width: 100%; }
.label-barcode-cod, .label-txt { font-size: 8pt; font-weight: 600; }
.label-addr { font-size: 12pt; font-weight: 700; }
.label-addr span { font-size: 8pt; font-weight: 600; margin-left: 6px; }
"#;

/// Render every label of the batch. A barcode that cannot be rendered is
/// reported as a warning and the label is emitted without its image.
pub fn render_html(batch: &LabelBatch, size: LabelSize) -> RenderedPage {
    let mut html = String::new();
    let mut barcode_failures = Vec::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Etiquetas</title>\
         <style>:root {{ --label-width: {}mm; --label-height: {}mm; }}{}</style></head><body>\n",
        size.width_mm, size.height_mm, STYLE
    );

    for label in &batch.labels {
        let svg = match &label.barcode_image {
            Some(spec) => match barcode::render_svg(&spec.data, &spec.options) {
                Ok(svg) => Some(svg),
                Err(e) => {
                    warning(format!("Barcode not rendered for {}: {}", spec.data, e));
                    barcode_failures.push(e.to_string());
                    None
                }
            },
            None => None,
        };
        write_label(&mut html, label, svg.as_deref());
    }

    html.push_str("</body></html>\n");

    RenderedPage {
        html,
        barcode_failures,
    }
}

fn write_label(html: &mut String, l: &LabelDescriptor, svg: Option<&str>) {
    let desc = escape_html(&l.desc);
    let addr = escape_html(&l.short_addr);
    let scanned = escape_html(&l.barcode);
    let cod = escape_html(&l.cod_formatted);
    let mat = escape_html(&l.matricula);
    let headline = escape_html(&l.headline);

    let _ = write!(
        html,
        "<div class=\"label-badge\">\
         <div class=\"label-row-top\"><div class=\"label-desc\">{desc}</div>\
         <div class=\"label-meta-top\"><div>{}</div></div></div>",
        l.printed_at
    );

    match l.kind {
        LabelKind::Validity => {
            let _ = write!(
                html,
                "<div class=\"label-row-middle\"><div class=\"label-big-num validity\">{headline}</div></div>\
                 <div class=\"label-row-bottom\"><div class=\"label-addr\">{addr}<span>{scanned}</span></div>\
                 <div class=\"label-info-right\"><div class=\"label-txt\">COD: {cod}</div>\
                 <div class=\"label-txt\">MAT: {mat}</div></div></div>"
            );
        }
        LabelKind::Standard => {
            let _ = write!(
                html,
                "<div class=\"label-row-middle\"><div class=\"label-big-num\">{headline}</div>\
                 <div class=\"label-barcode-section\"><div class=\"label-barcode-container\">{}</div>\
                 <div class=\"label-barcode-cod\">COD: {cod}</div></div></div>\
                 <div class=\"label-row-bottom\"><div class=\"label-addr\">{addr}<span>{scanned}</span></div>\
                 <div class=\"label-info-right\"><div class=\"label-txt\">MAT: {mat}</div></div></div>",
                svg.unwrap_or("")
            );
        }
    }

    html.push_str("</div>\n");
}

/// Boxed plain-text preview of one label.
pub fn render_preview(l: &LabelDescriptor) -> String {
    let width = 44;
    let line = "─".repeat(width);
    let mut out = String::new();

    let _ = writeln!(out, "┌{line}┐");
    let _ = writeln!(out, "│{}│", pad_right(&format!(" {}  {}", l.desc, l.printed_at), width));
    let _ = writeln!(out, "│{}│", pad_right(&format!(" {}", l.headline), width));
    if l.kind == LabelKind::Standard {
        let bars = l
            .barcode_image
            .as_ref()
            .and_then(|b| barcode::render_text(&b.data).ok())
            .map(|s| s.chars().take(width - 2).collect::<String>())
            .unwrap_or_default();
        let _ = writeln!(out, "│{}│", pad_right(&format!(" {}", bars), width));
    }
    let _ = writeln!(
        out,
        "│{}│",
        pad_right(&format!(" {}  {}", l.short_addr, l.barcode), width)
    );
    let _ = writeln!(
        out,
        "│{}│",
        pad_right(&format!(" COD: {}  MAT: {}", l.cod_formatted, l.matricula), width)
    );
    let _ = write!(out, "└{line}┘");

    out
}

/// Print the batch preview to stdout.
pub fn print_preview(batch: &LabelBatch) {
    for (i, label) in batch.labels.iter().enumerate() {
        let title = match label.kind {
            LabelKind::Validity => "validity".to_string(),
            LabelKind::Standard => format!("label {}", i + 1),
        };
        println!("{}", bold(&title));
        println!("{}", render_preview(label));
    }
}
