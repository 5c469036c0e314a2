pub mod level;
pub mod types;
