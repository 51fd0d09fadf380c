//! HTTP handlers for the Wood Traceability Platform

pub mod dashboard;
pub mod health;
pub mod inventory;
pub mod preadvice;
pub mod production;
pub mod receipt;
pub mod reporting;
pub mod seed;

pub use dashboard::*;
pub use health::*;
pub use inventory::*;
pub use preadvice::*;
pub use production::*;
pub use receipt::*;
pub use reporting::*;
pub use seed::*;
