pub mod cli;
pub mod core;
pub mod error;
pub mod resource;
pub mod types;
pub mod utils;
pub mod workflow;


// Re-export commonly used item
pub use error::{MediaError, MediaResult};
