pub mod candidate;
pub mod task;

pub use candidate::*;
pub use task::*;
