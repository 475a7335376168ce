pub mod breakdown;
pub mod cli;
pub mod db;
pub mod error;
pub mod hierarchy;
pub mod models;
pub mod output;
