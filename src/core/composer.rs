//! Builds the literal field values printed on each label.

use crate::models::address::ResolvedAddress;
use crate::models::label::{BarcodeOptions, BarcodeSpec, LabelBatch, LabelDescriptor, LabelKind};
use crate::models::product::Product;
use crate::utils::date::label_timestamp;
use chrono::NaiveDateTime;

/// Shown when no employee id was given.
pub const NO_MATRICULA: &str = "---";

/// Insert a hyphen before the check digit: `621412` → `62141-2`.
pub fn format_coddv(coddv: &str) -> String {
    let mut chars = coddv.chars();
    match chars.next_back() {
        Some(last) if coddv.chars().count() >= 2 => format!("{}-{}", chars.as_str(), last),
        _ => coddv.to_string(),
    }
}

/// Inputs of a label batch.
pub struct LabelRequest<'a> {
    pub product: &'a Product,
    pub address: &'a ResolvedAddress,
    pub scanned_barcode: &'a str,
    pub matricula: &'a str,
    pub copies: usize,
    pub validity: Option<&'a str>,
}

/// Compose `copies` identical standard labels, preceded by one validity label
/// when a (normalized) validity date is given.
pub fn compose(req: &LabelRequest<'_>, now: NaiveDateTime) -> LabelBatch {
    let printed_at = label_timestamp(now);
    let cod_formatted = format_coddv(&req.product.coddv);
    let matricula = match req.matricula.trim() {
        "" => NO_MATRICULA.to_string(),
        m => m.to_string(),
    };

    let base = LabelDescriptor {
        kind: LabelKind::Standard,
        desc: req.product.desc.clone(),
        printed_at,
        headline: req.address.large_num.clone(),
        short_addr: req.address.short_addr.clone(),
        barcode: req.scanned_barcode.to_string(),
        cod_formatted,
        matricula,
        barcode_image: Some(BarcodeSpec {
            data: req.product.coddv.clone(),
            options: BarcodeOptions::default(),
        }),
    };

    let copies = req.copies.max(1);
    let mut labels = Vec::new();

    if let Some(validity) = req.validity {
        labels.push(LabelDescriptor {
            kind: LabelKind::Validity,
            headline: validity.to_string(),
            barcode_image: None,
            ..base.clone()
        });
    }

    labels.extend(std::iter::repeat_n(base, copies));

    LabelBatch { labels }
}
