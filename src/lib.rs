pub mod cli;
pub mod config;
pub mod error;
pub mod hook;
pub mod report;
pub mod scan;
pub mod snapshot;
pub mod store;
