pub mod cli;
pub mod config;
pub mod mongosh;
pub mod validate;
