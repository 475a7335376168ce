pub mod client;
pub mod parser;
pub mod prompt;

pub use client::ModelClient;
pub use parser::{parse_reply, LineFormat};
