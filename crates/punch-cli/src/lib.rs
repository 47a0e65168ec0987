//! Employee attendance console library.
//!
//! This crate provides the console interface over `punch-core`.

mod cli;
pub mod commands;
mod config;
pub mod session;

pub use cli::{Cli, ClockArgs, Commands, ConsoleLine, RegisterArgs};
pub use config::Config;
pub use session::{Flow, Session};
