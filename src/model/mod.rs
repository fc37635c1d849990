pub mod status;
pub mod project;
pub mod task;
pub mod message;
pub mod config;

pub use status::*;
pub use project::*;
pub use task::*;
pub use message::*;
pub use config::*;
