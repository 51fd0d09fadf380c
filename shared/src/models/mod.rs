//! Domain models for the Wood Traceability Platform

mod inventory;
mod preadvice;
mod production;
mod receipt;

pub use inventory::*;
pub use preadvice::*;
pub use production::*;
pub use receipt::*;
