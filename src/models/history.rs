use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed print action, as persisted in the history log.
///
/// Field names match the on-disk JSON records so existing logs load as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub coddv: String,
    #[serde(default)]
    pub barcode: String,
    #[serde(default)]
    pub matricula: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub validity: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Data collected at print time; `id` is assigned by the store on append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryEntry {
    pub desc: String,
    pub coddv: String,
    pub barcode: String,
    pub matricula: String,
    pub address: String,
    pub kind: String,
    pub validity: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl NewHistoryEntry {
    pub fn with_id(self, id: i64) -> HistoryEntry {
        HistoryEntry {
            id,
            desc: self.desc,
            coddv: self.coddv,
            barcode: self.barcode,
            matricula: self.matricula,
            address: self.address,
            kind: self.kind,
            validity: self.validity,
            timestamp: self.timestamp,
        }
    }
}
