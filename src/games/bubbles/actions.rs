//! Semantic action IDs for Bubble Pop click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

pub const START_ROUND: u16 = 0;
pub const RESTART_ROUND: u16 = 1;
