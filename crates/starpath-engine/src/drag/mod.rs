pub mod controller;
pub mod proxy;

pub use controller::{DragSession, DropAttempt, PointerDragController};
pub use proxy::{DragProxy, PROXY_SCALE};
