pub mod apply;
pub mod config;
pub mod generate;
pub mod helpers;
pub mod improve;
pub mod status;
pub mod sync;
