pub mod animator;
pub mod layout;
pub mod tween;
