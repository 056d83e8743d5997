pub mod address;
pub mod destination;
pub mod history;
pub mod label;
pub mod product;
