pub mod barcode;
pub mod composer;
pub mod history;
pub mod log;
pub mod printer;
pub mod reference;
pub mod render;
pub mod resolver;
pub mod session;
pub mod validity;
