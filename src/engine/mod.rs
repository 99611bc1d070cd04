//! Timer-driven game loop: the cancellable gravity timer and the session
//! driver that owns it together with the core game.

pub mod session;
pub mod timer;

pub use session::Session;
pub use timer::{GravityTimer, TimerTick};
