pub mod markers;
pub mod resolver;
