pub mod aggregator;
pub mod api;
pub mod config;
pub mod engine;
pub mod feed;
pub mod store;
pub mod summarize;
