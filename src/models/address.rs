use serde::{Deserialize, Serialize};

/// One warehouse location for a product code (`CODDV`).
///
/// `endereco` is a dotted hierarchical path such as `PG06.001.019.934`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    #[serde(rename = "CODDV")]
    pub coddv: String,
    #[serde(rename = "TIPO")]
    pub tipo: String,
    #[serde(rename = "ENDERECO")]
    pub endereco: String,
}

impl AddressRecord {
    pub fn new(coddv: &str, tipo: &str, endereco: &str) -> Self {
        Self {
            coddv: coddv.to_string(),
            tipo: tipo.to_string(),
            endereco: endereco.to_string(),
        }
    }

    /// Dot-separated segments of the address path.
    pub fn segments(&self) -> Vec<&str> {
        self.endereco.split('.').collect()
    }
}

/// Address selected for a label, with the display fields derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAddress {
    pub large_num: String,
    pub short_addr: String,
    pub source_record: AddressRecord,
}
