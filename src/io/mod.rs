pub mod lock;
pub mod session;
pub mod store;
pub mod watcher;
pub mod write;
