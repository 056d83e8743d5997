use serde::Serialize;

use super::address::ResolvedAddress;
use super::destination::Destination;
use super::product::Product;

/// Options handed to the barcode renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarcodeOptions {
    pub format: &'static str,
    pub display_value: bool,
    pub font_size: u32,
    pub margin: u32,
    pub height: u32,
    pub width: f32,
}

impl Default for BarcodeOptions {
    fn default() -> Self {
        Self {
            format: "CODE128",
            display_value: false,
            font_size: 10,
            margin: 3,
            height: 25,
            width: 1.2,
        }
    }
}

/// Barcode image request attached to a standard label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarcodeSpec {
    pub data: String,
    pub options: BarcodeOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LabelKind {
    Standard,
    Validity,
}

/// Literal field values of one physical label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelDescriptor {
    pub kind: LabelKind,
    pub desc: String,
    pub printed_at: String,
    /// Oversized text: the address large number, or the validity date.
    pub headline: String,
    pub short_addr: String,
    pub barcode: String,
    pub cod_formatted: String,
    pub matricula: String,
    pub barcode_image: Option<BarcodeSpec>,
}

/// Ordered labels for one print job (validity label first, when present).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelBatch {
    pub labels: Vec<LabelDescriptor>,
}

impl LabelBatch {
    /// Number of physical labels, used for the counter increment.
    pub fn total_count(&self) -> usize {
        self.labels.len()
    }

    pub fn has_validity(&self) -> bool {
        self.labels.iter().any(|l| l.kind == LabelKind::Validity)
    }

    pub fn standard(&self) -> impl Iterator<Item = &LabelDescriptor> {
        self.labels.iter().filter(|l| l.kind == LabelKind::Standard)
    }
}

/// Search result held between "search submitted" and "print executed".
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPrintRequest {
    pub product: Product,
    pub target: ResolvedAddress,
    pub barcode: String,
    pub matricula: String,
    pub destination: Destination,
}
