pub mod autoscroll;
pub mod controller;
pub mod session;

pub use autoscroll::{AutoScrollHeuristic, AutoScrollTimer, ScrollDirection};
pub use controller::DragController;
pub use session::{DragOutcome, DragSession, DragState, DragTarget, EndReason};
