//! In-memory lookup tables built from the two reference files.

use crate::errors::AppResult;
use crate::models::address::AddressRecord;
use crate::models::product::Product;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Top-level keys of the reference files.
pub const PRODUCTS_KEY: &str = "BASE_CADASTRO";
pub const ADDRESSES_KEY: &str = "BASE_END";

/// Counters collected while building the index.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildStats {
    pub products: usize,
    pub addresses: usize,
    pub duplicate_barcodes: usize,
    pub skipped_products: usize,
    pub skipped_addresses: usize,
}

/// Write-once lookup structure: barcode → product, product code → addresses.
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    products_by_barcode: HashMap<String, Product>,
    addresses_by_code: HashMap<String, Vec<AddressRecord>>,
    stats: BuildStats,
}

impl ReferenceIndex {
    /// Build the index. Duplicate barcodes overwrite earlier entries;
    /// address records with an empty `CODDV` are skipped. Address order is preserved.
    pub fn build(products: Vec<Product>, addresses: Vec<AddressRecord>) -> Self {
        let mut stats = BuildStats::default();
        let mut products_by_barcode = HashMap::with_capacity(products.len());

        for p in products {
            if p.barras.is_empty() {
                stats.skipped_products += 1;
                continue;
            }
            if products_by_barcode.insert(p.barras.clone(), p).is_some() {
                stats.duplicate_barcodes += 1;
            }
        }

        let mut addresses_by_code: HashMap<String, Vec<AddressRecord>> = HashMap::new();
        for a in addresses {
            if a.coddv.is_empty() {
                stats.skipped_addresses += 1;
                continue;
            }
            addresses_by_code.entry(a.coddv.clone()).or_default().push(a);
            stats.addresses += 1;
        }

        stats.products = products_by_barcode.len();

        Self {
            products_by_barcode,
            addresses_by_code,
            stats,
        }
    }

    /// Load both reference files and build the index.
    pub fn load(products_file: &Path, addresses_file: &Path) -> AppResult<Self> {
        let products = read_table(products_file, PRODUCTS_KEY)?
            .iter()
            .map(product_from_value)
            .collect::<Vec<_>>();
        let addresses = read_table(addresses_file, ADDRESSES_KEY)?
            .iter()
            .map(address_from_value)
            .collect::<Vec<_>>();

        Ok(Self::build(products, addresses))
    }

    pub fn lookup_product(&self, barcode: &str) -> Option<&Product> {
        self.products_by_barcode.get(barcode)
    }

    /// Addresses for a product code, in source order (empty if unknown).
    pub fn lookup_addresses(&self, coddv: &str) -> &[AddressRecord] {
        self.addresses_by_code
            .get(coddv)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }
}

/// Read `{ "<key>": [ ... ] }`; a missing key yields an empty table.
fn read_table(path: &Path, key: &str) -> AppResult<Vec<Value>> {
    let content = fs::read_to_string(path)?;
    let json: Value = serde_json::from_str(&content)?;

    Ok(match json {
        Value::Object(mut tables) => match tables.remove(key) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    })
}

/// Field as text: strings verbatim, numbers in decimal, anything else empty.
fn field(v: &Value, name: &str) -> String {
    match v.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn product_from_value(v: &Value) -> Product {
    Product {
        barras: field(v, "BARRAS"),
        coddv: field(v, "CODDV"),
        desc: field(v, "DESC"),
    }
}

fn address_from_value(v: &Value) -> AddressRecord {
    AddressRecord {
        coddv: field(v, "CODDV"),
        tipo: field(v, "TIPO"),
        endereco: field(v, "ENDERECO"),
    }
}
