use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Destination mode chosen by the operator: which address category to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Destination {
    /// Buffer stock (bulk overflow storage).
    #[value(name = "pulmao")]
    #[serde(rename = "pulmao")]
    Buffer,
    /// Picking face.
    #[value(name = "separacao")]
    #[serde(rename = "separacao")]
    Picking,
}

impl Destination {
    /// `TIPO` value an address record must carry to match this mode.
    pub fn category(&self) -> &'static str {
        match self {
            Destination::Buffer => "PULMÃO",
            Destination::Picking => "SEPARACAO",
        }
    }

    /// Value stored in history entries (`type` field).
    pub fn as_str(&self) -> &'static str {
        match self {
            Destination::Buffer => "pulmao",
            Destination::Picking => "separacao",
        }
    }

    /// Human label used in status messages.
    pub fn label(&self) -> &'static str {
        match self {
            Destination::Buffer => "PULMÃO",
            Destination::Picking => "SEPARAÇÃO",
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
