//! moodwave CLI library.
//!
//! Configuration, logging setup, output storage and the command
//! implementations behind the `moodwave` binary.

pub mod commands;
pub mod config;
pub mod logging;
pub mod storage;
