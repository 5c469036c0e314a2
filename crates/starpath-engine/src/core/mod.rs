pub mod layout;
pub mod rng;
pub mod time;
