//! Domain values consumed by the filter engine and the service layer.

pub mod category;
pub mod company;
pub mod filter;
pub mod types;
