//! Business logic services for the Wood Traceability Platform

pub mod dashboard;
pub mod inventory;
pub mod preadvice;
pub mod production;
pub mod receipt;
pub mod reporting;
pub mod seed;

pub use dashboard::DashboardService;
pub use inventory::InventoryService;
pub use preadvice::PreadviceService;
pub use production::ProductionService;
pub use receipt::ReceiptService;
pub use reporting::ReportingService;
pub use seed::SeedService;
