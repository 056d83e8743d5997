use serde::{Deserialize, Serialize};

/// A catalog product, keyed by its scanned barcode (`BARRAS`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "BARRAS")]
    pub barras: String,
    #[serde(rename = "CODDV")]
    pub coddv: String,
    #[serde(rename = "DESC")]
    pub desc: String,
}

impl Product {
    pub fn new(barras: &str, coddv: &str, desc: &str) -> Self {
        Self {
            barras: barras.to_string(),
            coddv: coddv.to_string(),
            desc: desc.to_string(),
        }
    }
}
