// The binary reaches everything through the library crate so integration
// tests exercise the same code paths.
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod shell;
