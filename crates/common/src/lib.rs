pub mod error;
pub mod scale;
pub mod types;
