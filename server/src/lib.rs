pub mod config;
pub mod error;
pub mod logging;
pub mod polls;
pub mod store;
pub mod web;
