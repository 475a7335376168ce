pub mod breakdown;
pub mod commands;
pub mod init;
pub mod task;

pub use commands::*;
