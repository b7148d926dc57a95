pub mod command;
pub mod commands;
pub mod config;
pub mod interrupt;
pub mod logging;
pub mod options;
pub mod repl;
pub mod session;
