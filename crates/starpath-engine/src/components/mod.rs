pub mod item;
pub mod target;
