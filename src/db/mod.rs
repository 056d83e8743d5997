pub mod counter;
pub mod initialize;
pub mod log;
pub mod pool;
