pub mod abi;
pub mod artifacts;
pub mod chain;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod forge;
pub mod tx_log;
pub mod units;
