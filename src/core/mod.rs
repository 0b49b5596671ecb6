pub mod aggregator;
pub mod handler;
