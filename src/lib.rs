#![forbid(unsafe_code)]

pub mod catalogue;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod registry;
pub mod utils;
pub mod version;
