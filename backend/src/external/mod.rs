//! External API integrations

pub mod traces;

pub use traces::TracesClient;
