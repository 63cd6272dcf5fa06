//! Command implementations for the kinconnect CLI

pub mod config;
pub mod options;
