pub mod compose;
pub mod progress;
pub mod tabs;
pub mod timeline;

pub use compose::*;
pub use progress::*;
pub use tabs::*;
pub use timeline::*;
