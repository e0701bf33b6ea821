pub mod attendance;
pub mod backend;
pub mod pipeline;
pub mod shared;
