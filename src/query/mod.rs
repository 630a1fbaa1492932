pub mod builder;
pub mod window;

pub use builder::build_queries;
pub use window::TimeWindow;
