//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError so that every failure
//! ends up as a single user-facing status line.

use crate::models::destination::Destination;
use std::io;
use thiserror::Error;

/// Why a 4-digit validity (MMAA) input was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityError {
    #[error("Validity must have exactly 4 digits (MMYY), e.g. 0126")]
    WrongLength,

    #[error("Invalid month: enter a month between 01 and 12")]
    InvalidMonth,

    #[error("Validity must be at least 5 months from now")]
    TooSoon,

    #[error("Validity cannot exceed 5 years from now")]
    TooFar,
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / storage
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Lookup / resolution
    // ---------------------------
    #[error("Product not found (BARRAS: {0})")]
    ProductNotFound(String),

    #[error("Product found, but it has no {} address", .0.label())]
    NoAddressOfType(Destination),

    // ---------------------------
    // Operator input
    // ---------------------------
    #[error("Enter the employee id (matricula) before continuing")]
    MissingMatricula,

    #[error("Enter the product barcode")]
    MissingBarcode,

    #[error("{0}")]
    Validity(#[from] ValidityError),

    #[error("Too many copies: {0} (maximum {max})", max = crate::core::session::MAX_COPIES)]
    TooManyCopies(String),

    #[error("No pending print request: scan a product first")]
    NoPendingRequest,

    // ---------------------------
    // Rendering / printing / counter
    // ---------------------------
    #[error("Barcode error: {0}")]
    Barcode(String),

    #[error("Print error: {0}")]
    Print(String),

    #[error("Counter service error: {0}")]
    Counter(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,
}

pub type AppResult<T> = Result<T, AppError>;
