//! Code 128 (subset B) encoder and SVG renderer for the label barcode.

use crate::errors::{AppError, AppResult};
use crate::models::label::BarcodeOptions;
use crate::utils::formatting::escape_html;
use std::fmt::Write;

/// Bar/space widths for symbol values 0..=105.
const PATTERNS: [&str; 106] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312",
    "132212", "221213", "221312", "231212", "112232", "122132", "122231", "113222",
    "123122", "123221", "223211", "221132", "221231", "213212", "223112", "312131",
    "311222", "321122", "321221", "312212", "322112", "322211", "212123", "212321",
    "232121", "111323", "131123", "131321", "112313", "132113", "132311", "211313",
    "231113", "231311", "112133", "112331", "132131", "113123", "113321", "133121",
    "313121", "211331", "231131", "213113", "213311", "213131", "311123", "311321",
    "331121", "312113", "312311", "332111", "314111", "221411", "431111", "111224",
    "111422", "121124", "121421", "141122", "141221", "112214", "112412", "122114",
    "122411", "142112", "142211", "241211", "221114", "413111", "241112", "134111",
    "111242", "121142", "121241", "114212", "124112", "124211", "411212", "421112",
    "421211", "212141", "214121", "412121", "111143", "111341", "131141", "114113",
    "114311", "411113", "411311", "113141", "114131", "311141", "411131", "211412",
    "211214", "211232",
];

const START_B: usize = 104;
const STOP: &str = "2331112";

/// Encode `data` as Code 128-B modules (`true` = bar), including start,
/// checksum and stop symbols. Accepts printable ASCII of any length.
pub fn encode(data: &str) -> AppResult<Vec<bool>> {
    if data.is_empty() {
        return Err(AppError::Barcode("empty barcode data".into()));
    }

    let mut values = Vec::with_capacity(data.len() + 3);
    values.push(START_B);
    for c in data.chars() {
        let code = c as u32;
        if !(32..=126).contains(&code) {
            return Err(AppError::Barcode(format!(
                "character '{}' cannot be encoded in CODE128",
                c
            )));
        }
        values.push((code - 32) as usize);
    }

    let checksum = values
        .iter()
        .enumerate()
        .map(|(i, v)| if i == 0 { *v } else { i * v })
        .sum::<usize>()
        % 103;
    values.push(checksum);

    let mut modules = Vec::new();
    for v in values {
        push_pattern(&mut modules, PATTERNS[v]);
    }
    push_pattern(&mut modules, STOP);

    Ok(modules)
}

fn push_pattern(modules: &mut Vec<bool>, pattern: &str) {
    for (i, w) in pattern.bytes().enumerate() {
        let bar = i % 2 == 0;
        for _ in 0..(w - b'0') {
            modules.push(bar);
        }
    }
}

/// Render `data` as a standalone SVG image.
pub fn render_svg(data: &str, opts: &BarcodeOptions) -> AppResult<String> {
    if opts.format != "CODE128" {
        return Err(AppError::Barcode(format!(
            "unsupported format {}",
            opts.format
        )));
    }
    let modules = encode(data)?;

    let margin = opts.margin as f32;
    let total_w = modules.len() as f32 * opts.width + 2.0 * margin;
    let text_h = if opts.display_value {
        opts.font_size as f32 + 2.0
    } else {
        0.0
    };
    let total_h = opts.height as f32 + 2.0 * margin + text_h;

    let mut svg = String::new();
    let _ = write!(
        svg,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{total_w}" height="{total_h}" viewBox="0 0 {total_w} {total_h}" preserveAspectRatio="none">"##
    );
    let _ = write!(
        svg,
        r##"<rect x="0" y="0" width="{total_w}" height="{total_h}" fill="#ffffff"/>"##
    );

    let mut i = 0;
    while i < modules.len() {
        if !modules[i] {
            i += 1;
            continue;
        }
        let start = i;
        while i < modules.len() && modules[i] {
            i += 1;
        }
        let x = margin + start as f32 * opts.width;
        let w = (i - start) as f32 * opts.width;
        let _ = write!(
            svg,
            r##"<rect x="{x}" y="{margin}" width="{w}" height="{}" fill="#000000"/>"##,
            opts.height
        );
    }

    if opts.display_value {
        let _ = write!(
            svg,
            r##"<text x="{}" y="{}" font-size="{}" text-anchor="middle">{}</text>"##,
            total_w / 2.0,
            margin + opts.height as f32 + opts.font_size as f32,
            opts.font_size,
            escape_html(data)
        );
    }

    svg.push_str("</svg>");
    Ok(svg)
}

/// One-line terminal preview of the bars.
pub fn render_text(data: &str) -> AppResult<String> {
    Ok(encode(data)?
        .into_iter()
        .map(|bar| if bar { '█' } else { ' ' })
        .collect())
}
