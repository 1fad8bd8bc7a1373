pub mod task;
pub mod filter;
pub mod due;
pub mod config;

pub use task::*;
pub use filter::*;
pub use due::*;
pub use config::*;
