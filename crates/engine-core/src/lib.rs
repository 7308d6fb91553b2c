pub mod connectors;
pub mod convert;
pub mod error;
pub mod metrics;
pub mod scheduler;
